//! Well-known application paths.

use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::result::AppResult;

/// Directory holding configuration, presets and other per-user state.
pub fn config_dir() -> AppResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::configuration("could not determine the home directory"))?;
    Ok(home.join(".bundlesmith"))
}

/// Default location of the configuration file.
pub fn default_config_file() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Directory where saved presets live.
pub fn presets_dir() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("presets"))
}

/// Create a directory (and its parents) if it does not exist yet.
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
