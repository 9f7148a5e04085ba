use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error("{0} is not a valid example name.")]
    InvalidExample(String),

    #[error("invalid bot name '{0}': {1}")]
    InvalidName(String, &'static str),

    #[error("{0}")]
    CommandFailed(String),

    #[error("assets directory not found at {}", .0.display())]
    AssetsNotFound(PathBuf),

    #[error("binary not found at {}. Did the build succeed?", .0.display())]
    BinaryNotFound(PathBuf),

    #[error("'{0}' in the assets directory collides with the binary entry name")]
    DuplicateEntry(String),

    #[error("invalid config {}: {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}
