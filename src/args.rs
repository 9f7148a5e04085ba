use crate::example::Example;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Command-line arguments for ladder-zip
#[derive(Debug)]
pub struct Args {
    /// Bot name on the ladder; names the zip and the binary inside it
    pub name: String,

    /// Bundled example to build instead of the user's bot (unvalidated)
    pub example: Option<String>,

    /// Project directory containing build.zig and ladder_build
    pub path: Option<PathBuf>,

    /// Alternative config file instead of ladder.toml
    pub config: Option<PathBuf>,

    /// Enable verbose output
    pub verbose: bool,

    /// Skip the zig build (package the existing binary)
    pub no_build: bool,
}

pub fn command() -> Command {
    Command::new("ladder-zip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create a zip for the sc2ai ladder.")
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .required(true)
                .help("Name of the executable in the zip. Needs to be the same as your bot name on sc2ai.net.")
        )
        .arg(
            Arg::new("example")
                .short('e')
                .long("example")
                .value_name("EXAMPLE")
                .help(format!(
                    "Example bot to build, one of: {}. Leave empty when building your own bot.",
                    Example::names().collect::<Vec<_>>().join(", ")
                ))
        )
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("DIR")
                .help("Project directory (defaults to the current directory)")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to an alternative config file instead of ladder.toml")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output")
        )
        .arg(
            Arg::new("no-build")
                .long("no-build")
                .action(ArgAction::SetTrue)
                .help("Skip the zig build (package the existing binary)")
        )
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            name: matches.get_one::<String>("name").cloned().unwrap_or_default(),
            example: matches.get_one::<String>("example").cloned(),
            path: matches.get_one::<String>("path").map(PathBuf::from),
            config: matches.get_one::<String>("config").map(PathBuf::from),
            verbose: matches.get_flag("verbose"),
            no_build: matches.get_flag("no-build"),
        }
    }
}
