//! Execution context handed to plugins.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::build::{BuildConfig, BuildResult};
use crate::config::AppConfig;

/// Snapshot of the application state at hook time.
///
/// Plugins receive a context instead of live application handles, so they
/// can be exercised in isolation and the host stays in control of what is
/// visible. The serialized field names are stable; external tooling reads
/// contexts dumped as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// The options the finished (or upcoming) build ran with.
    pub build_config: BuildConfig,
    /// Resolved location of the build artifact, when one is known.
    pub output_path: Option<PathBuf>,
    /// Outcome of the build.
    pub build_result: BuildResult,
    /// Application-level settings, for plugins that read their own section.
    pub app_config: AppConfig,
}

impl ExecutionContext {
    /// Build a context from the pieces the host holds after a run.
    ///
    /// The artifact location comes from the build result when the backend
    /// reported one, otherwise from the configured output directory if that
    /// is non-empty.
    pub fn for_build(
        build_config: BuildConfig,
        build_result: BuildResult,
        app_config: AppConfig,
    ) -> Self {
        let output_path = build_result
            .output_path
            .clone()
            .or_else(|| match build_config.output_dir.is_empty() {
                true => None,
                false => Some(PathBuf::from(&build_config.output_dir)),
            });
        Self {
            build_config,
            output_path,
            build_result,
            app_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BuildStatus;
    use std::time::Duration;

    #[test]
    fn output_path_prefers_build_result() {
        let mut config = BuildConfig::default();
        config.output_dir = "dist".into();
        let result = BuildResult::succeeded("dist/app.exe", Duration::from_secs(2));

        let context = ExecutionContext::for_build(config, result, AppConfig::default());
        assert_eq!(
            context.output_path.as_deref(),
            Some(std::path::Path::new("dist/app.exe"))
        );
    }

    #[test]
    fn output_path_falls_back_to_output_dir() {
        let mut config = BuildConfig::default();
        config.output_dir = "dist".into();
        let result = BuildResult::failed("no artifact", Duration::from_secs(1));

        let context = ExecutionContext::for_build(config, result, AppConfig::default());
        assert_eq!(context.output_path.as_deref(), Some(std::path::Path::new("dist")));
    }

    #[test]
    fn output_path_absent_when_nothing_known() {
        let context = ExecutionContext::for_build(
            BuildConfig::default(),
            BuildResult::idle(),
            AppConfig::default(),
        );
        assert!(context.output_path.is_none());
    }

    #[test]
    fn serialized_context_exposes_stable_keys() {
        let mut config = BuildConfig::default();
        config.script_path = "main.py".into();
        let result = BuildResult {
            status: BuildStatus::Success,
            output_path: Some(PathBuf::from("dist/app")),
            error_message: String::new(),
            elapsed: Duration::from_secs(4),
            finished_at: chrono::Local::now(),
        };
        let context = ExecutionContext::for_build(config, result, AppConfig::default());

        let value = serde_json::to_value(&context).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        for key in ["build_config", "output_path", "build_result", "app_config"] {
            assert!(object.contains_key(key), "missing key {key}");
        }
    }
}
