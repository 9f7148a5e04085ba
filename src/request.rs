use crate::error::Error;
use crate::example::Example;
use crate::result::Result;

/// A validated submission request: the ladder bot name and an optional example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    name: String,
    example: Option<Example>,
}

impl BuildRequest {
    /// Validate raw command-line values.
    ///
    /// An empty example string counts as "not supplied". The name must be
    /// usable both as a file name and as a zip entry name. The example is
    /// checked first so an unknown example is always reported as such.
    pub fn new(name: &str, example: Option<&str>) -> Result<Self> {
        let example = match example {
            Some(e) if !e.is_empty() => Some(e.parse::<Example>()?),
            _ => None,
        };

        validate_name(name)?;

        Ok(Self {
            name: name.to_string(),
            example,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn example(&self) -> Option<Example> {
        self.example
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name == "." || name == ".." {
        "name is a relative directory"
    } else if name.contains(['/', '\\']) {
        "name contains a path separator"
    } else {
        return Ok(());
    };

    Err(Error::InvalidName(name.to_string(), reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only() {
        let req = BuildRequest::new("MyBot", None).unwrap();
        assert_eq!(req.name(), "MyBot");
        assert_eq!(req.example(), None);
    }

    #[test]
    fn test_empty_example_means_none() {
        let req = BuildRequest::new("MyBot", Some("")).unwrap();
        assert_eq!(req.example(), None);
    }

    #[test]
    fn test_valid_example() {
        let req = BuildRequest::new("MyBot", Some("two_base_protoss")).unwrap();
        assert_eq!(req.example(), Some(Example::TwoBaseProtoss));
    }

    #[test]
    fn test_invalid_example_names_value() {
        let err = BuildRequest::new("MyBot", Some("proxy_gates")).unwrap_err();
        assert_eq!(err.to_string(), "proxy_gates is not a valid example name.");
    }

    #[test]
    fn test_invalid_example_reported_before_bad_name() {
        let err = BuildRequest::new("", Some("bogus")).unwrap_err();
        assert!(matches!(&err, Error::InvalidExample(e) if e == "bogus"));
    }

    #[test]
    fn test_bad_names() {
        for name in ["", ".", "..", "bots/MyBot", "..\\MyBot"] {
            let err = BuildRequest::new(name, None).unwrap_err();
            assert!(matches!(err, Error::InvalidName(..)), "{name:?} accepted");
        }
    }
}
