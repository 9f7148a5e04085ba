use crate::error::Error;
use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the project directory from `--path`, defaulting to the current directory
pub fn find_project_dir(path: Option<&Path>) -> Result<PathBuf> {
    let base_path = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !base_path.is_dir() {
        return Err(Error::custom(format!(
            "project directory not found: {}",
            base_path.display()
        )));
    }

    Ok(base_path)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
