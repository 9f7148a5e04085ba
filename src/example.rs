use crate::error::Error;
use std::str::FromStr;

/// Bundled example bots that can be built in place of the user's own bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Example {
    OneBaseTerran,
    MassReaper,
    TwoBaseProtoss,
}

impl Example {
    /// Every recognized example, in the order they are listed in `--help`
    pub const ALL: &'static [Example] = &[
        Example::OneBaseTerran,
        Example::MassReaper,
        Example::TwoBaseProtoss,
    ];

    /// Identifier passed to `-Dexample=` and used as the binary name
    pub fn as_str(&self) -> &'static str {
        match self {
            Example::OneBaseTerran => "one_base_terran",
            Example::MassReaper => "mass_reaper",
            Example::TwoBaseProtoss => "two_base_protoss",
        }
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(Example::as_str)
    }
}

impl FromStr for Example {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|example| example.as_str() == s)
            .ok_or_else(|| Error::InvalidExample(s.to_string()))
    }
}

impl std::fmt::Display for Example {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
