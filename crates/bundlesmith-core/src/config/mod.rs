//! Application configuration.
//!
//! Settings load from a TOML file with `BUNDLESMITH__*` environment
//! variables layered on top, so any value can be overridden per invocation
//! (`BUNDLESMITH__LOGGING__LEVEL=debug` and so on).

mod general;
mod logging;
mod plugins;

pub use general::{GeneralConfig, MAX_RECENT_PROJECTS};
pub use logging::LoggingConfig;
pub use plugins::{HttpUploadSettings, PluginsConfig};

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// General application behavior.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Plugin directory and per-plugin settings.
    #[serde(default)]
    pub plugins: PluginsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a file, with environment variable overrides.
    ///
    /// A missing file is not an error; defaults fill every gap.
    pub fn load(path: &Path) -> AppResult<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("BUNDLESMITH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Persist the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            crate::paths::ensure_dir(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
