//! Plugin-related settings.

use serde::{Deserialize, Serialize};

/// Plugin discovery and per-plugin settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginsConfig {
    /// Directory scanned for activation manifests.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Scan the plugin directory on startup.
    #[serde(default = "default_true")]
    pub auto_load: bool,
    /// Settings for the HTTP upload plugin.
    #[serde(default)]
    pub http_upload: HttpUploadSettings,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            auto_load: true,
            http_upload: HttpUploadSettings::default(),
        }
    }
}

/// Settings consumed by the HTTP upload plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpUploadSettings {
    /// Where artifacts are POSTed. Empty disables the plugin.
    #[serde(default)]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpUploadSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_directory() -> String {
    "./plugins".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}
