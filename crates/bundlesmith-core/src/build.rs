//! Build configuration and outcome types.
//!
//! [`BuildConfig`] captures everything the packaging backend needs to turn a
//! Python entry script into a standalone executable. [`BuildResult`] records
//! how a run ended. Both are plain data and serialize cleanly, so they can be
//! persisted as presets or handed to plugins.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a packaging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    /// No build has been started yet.
    Idle,
    /// The backend process is currently running.
    Running,
    /// The build finished and produced an artifact.
    Success,
    /// The build finished with an error.
    Failed,
    /// The build was cancelled before it finished.
    Cancelled,
}

impl BuildStatus {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether this status represents a completed, successful build.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An extra data file bundled into the executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFile {
    /// Path of the file on disk.
    pub source: String,
    /// Destination path inside the bundle.
    pub dest: String,
}

/// Options for a single packaging run.
///
/// Paths are kept as strings because they travel through presets, the
/// configuration layer, and plugin contexts; resolution against the
/// filesystem happens at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// The Python entry script to package.
    #[serde(default)]
    pub script_path: String,
    /// Optional requirements file installed before packaging.
    #[serde(default)]
    pub requirements_path: String,
    /// Directory the artifact is written to.
    #[serde(default)]
    pub output_dir: String,
    /// Optional icon file embedded into the executable.
    #[serde(default)]
    pub icon_path: String,
    /// Name of the produced application. Empty means derive from the script.
    #[serde(default)]
    pub app_name: String,
    /// Produce a single-file executable rather than a directory.
    #[serde(default = "default_true")]
    pub one_file: bool,
    /// Keep a console window attached to the executable.
    #[serde(default)]
    pub console_mode: bool,
    /// Remove intermediate build files before packaging.
    #[serde(default = "default_true")]
    pub clean_build: bool,
    /// Modules the import analyzer misses and must be forced in.
    #[serde(default)]
    pub hidden_imports: Vec<String>,
    /// Modules to exclude from the bundle.
    #[serde(default)]
    pub exclude_modules: Vec<String>,
    /// Extra data files bundled alongside the code.
    #[serde(default)]
    pub data_files: Vec<DataFile>,
    /// Raw extra arguments passed through to the backend.
    #[serde(default)]
    pub additional_args: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            script_path: String::new(),
            requirements_path: String::new(),
            output_dir: String::new(),
            icon_path: String::new(),
            app_name: String::new(),
            one_file: true,
            console_mode: false,
            clean_build: true,
            hidden_imports: Vec::new(),
            exclude_modules: Vec::new(),
            data_files: Vec::new(),
            additional_args: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Outcome of a packaging run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResult {
    /// Final state of the run.
    pub status: BuildStatus,
    /// Where the artifact landed, if the backend reported it.
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    /// Backend error output. Empty on success.
    #[serde(default)]
    pub error_message: String,
    /// Wall-clock duration of the run.
    #[serde(default)]
    pub elapsed: Duration,
    /// When the run finished.
    #[serde(default = "chrono::Local::now")]
    pub finished_at: DateTime<Local>,
}

impl BuildResult {
    /// Result for a run that has not happened yet.
    pub fn idle() -> Self {
        Self {
            status: BuildStatus::Idle,
            output_path: None,
            error_message: String::new(),
            elapsed: Duration::ZERO,
            finished_at: Local::now(),
        }
    }

    /// Result for a run that produced an artifact.
    pub fn succeeded(output_path: impl Into<PathBuf>, elapsed: Duration) -> Self {
        Self {
            status: BuildStatus::Success,
            output_path: Some(output_path.into()),
            error_message: String::new(),
            elapsed,
            finished_at: Local::now(),
        }
    }

    /// Result for a run that ended with an error.
    pub fn failed(error_message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            status: BuildStatus::Failed,
            output_path: None,
            error_message: error_message.into(),
            elapsed,
            finished_at: Local::now(),
        }
    }
}

impl Default for BuildResult {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&BuildStatus::Success).unwrap();
        assert_eq!(json, "\"success\"");
        let back: BuildStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, BuildStatus::Cancelled);
    }

    #[test]
    fn status_success_check() {
        assert!(BuildStatus::Success.is_success());
        assert!(!BuildStatus::Failed.is_success());
        assert!(!BuildStatus::Running.is_success());
    }

    #[test]
    fn config_defaults_favor_single_file() {
        let config = BuildConfig::default();
        assert!(config.one_file);
        assert!(!config.console_mode);
        assert!(config.clean_build);
        assert!(config.script_path.is_empty());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = BuildConfig::default();
        config.script_path = "app/main.py".into();
        config.app_name = "demo".into();
        config.hidden_imports = vec!["pkg_resources".into()];
        config.data_files = vec![DataFile {
            source: "assets/logo.png".into(),
            dest: "assets".into(),
        }];

        let text = toml::to_string_pretty(&config).unwrap();
        let back: BuildConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let back: BuildConfig = toml::from_str("script_path = \"x.py\"").unwrap();
        assert_eq!(back.script_path, "x.py");
        assert!(back.one_file);
        assert!(back.clean_build);
        assert!(back.data_files.is_empty());
    }

    #[test]
    fn result_constructors_set_status() {
        let ok = BuildResult::succeeded("dist/app", Duration::from_secs(3));
        assert_eq!(ok.status, BuildStatus::Success);
        assert_eq!(ok.output_path.as_deref(), Some(std::path::Path::new("dist/app")));
        assert!(ok.error_message.is_empty());

        let bad = BuildResult::failed("backend exited with 1", Duration::from_secs(1));
        assert_eq!(bad.status, BuildStatus::Failed);
        assert!(bad.output_path.is_none());
        assert_eq!(bad.error_message, "backend exited with 1");
    }
}
