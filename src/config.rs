use crate::context::Context;
use crate::error::Error;
use crate::request::BuildRequest;
use crate::result::Result;
use crate::tpl::Tpl;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional project configuration file
pub const CONFIG_FILE: &str = "ladder.toml";

#[derive(Debug, Deserialize, Default)]
pub struct LadderToml {
    #[serde(default)]
    pub ladder: Option<LadderConfig>,
}

/// The `[ladder]` table. Every key is optional.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LadderConfig {
    #[serde(default)]
    pub zig: Option<String>,

    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub optimize: Option<String>,

    #[serde(default)]
    pub build_args: Vec<String>,

    #[serde(default)]
    pub assets: Option<String>,

    #[serde(default)]
    pub bin_dir: Option<String>,

    #[serde(default)]
    pub default_binary: Option<String>,

    #[serde(default)]
    pub output_folder: Option<String>,

    #[serde(default)]
    pub archive: Option<String>,
}

/// Configuration with defaults applied. Strings may still contain
/// `$NAME`, `$BINARY` and `$TARGET` until expanded with [`Config::template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub zig: String,
    pub target: String,
    pub optimize: String,
    pub build_args: Vec<String>,
    pub assets: String,
    pub bin_dir: String,
    pub default_binary: String,
    pub output_folder: String,
    pub archive: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(LadderConfig::default())
    }
}

impl From<LadderConfig> for Config {
    fn from(cfg: LadderConfig) -> Self {
        Self {
            zig: cfg.zig.unwrap_or_else(|| "zig".to_string()),
            target: cfg.target.unwrap_or_else(|| "x86_64-linux".to_string()),
            optimize: cfg.optimize.unwrap_or_else(|| "ReleaseSafe".to_string()),
            build_args: cfg.build_args,
            assets: cfg.assets.unwrap_or_else(|| "ladder_build".to_string()),
            bin_dir: cfg.bin_dir.unwrap_or_else(|| "zig-out/bin".to_string()),
            default_binary: cfg.default_binary.unwrap_or_else(|| "zig-bot".to_string()),
            output_folder: cfg.output_folder.unwrap_or_else(|| ".".to_string()),
            archive: cfg.archive.unwrap_or_else(|| "$NAME.zip".to_string()),
        }
    }
}

impl Config {
    /// Load configuration for the project in `ctx.base_dir`.
    ///
    /// With no explicit path a missing `ladder.toml` yields the defaults;
    /// an explicit path must exist.
    pub fn load(ctx: &Context, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => ctx.base_dir.join(p),
            None => {
                let default_path = ctx.base_dir.join(CONFIG_FILE);
                if !default_path.is_file() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| Error::InvalidConfig {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        Self::parse(&content).map_err(|e| match e {
            Error::Toml(e) => Error::InvalidConfig {
                path,
                reason: e.message().to_string(),
            },
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: LadderToml = toml::from_str(content)?;
        Ok(file.ladder.unwrap_or_default().into())
    }

    /// Name of the binary the toolchain produces for this request
    pub fn binary_name(&self, request: &BuildRequest) -> String {
        match request.example() {
            Some(example) => example.as_str().to_string(),
            None => self.default_binary.clone(),
        }
    }

    /// Template variables available to config values for this request
    pub fn template(&self, request: &BuildRequest) -> Tpl {
        let mut tpl = Tpl::new();
        tpl.register("NAME", request.name());
        tpl.register("BINARY", self.binary_name(request));
        tpl.register("TARGET", self.target.as_str());
        tpl
    }

    pub fn assets_dir(&self, ctx: &Context, tpl: &Tpl) -> PathBuf {
        ctx.base_dir.join(tpl.parse(&self.assets))
    }

    pub fn bin_dir(&self, ctx: &Context, tpl: &Tpl) -> PathBuf {
        ctx.base_dir.join(tpl.parse(&self.bin_dir))
    }

    pub fn archive_path(&self, ctx: &Context, tpl: &Tpl) -> PathBuf {
        ctx.base_dir
            .join(tpl.parse(&self.output_folder))
            .join(tpl.parse(&self.archive))
    }
}
