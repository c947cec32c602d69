//! # Plugin: Artifact Clean
//!
//! Removes the intermediate files the packaging backend leaves next to the
//! entry script: the `build/` work directory and generated `.spec`
//! descriptors. Only the distributable output survives.

use std::path::{Path, PathBuf};

use bundlesmith_core::buildlog::BuildLog;
use bundlesmith_core::context::ExecutionContext;
use bundlesmith_plugin::outcome::HookResult;
use bundlesmith_plugin::plugin_info;
use bundlesmith_plugin::traits::{Plugin, PluginInfo};

/// Registered name and manifest stem of this plugin.
pub const PLUGIN_NAME: &str = "artifact_clean";

/// Removes backend work files after a build.
///
/// A workspace with nothing to clean is a success, not an error; the
/// plugin reports what it removed and stays quiet about what it did not
/// find.
#[derive(Debug, Default)]
pub struct ArtifactCleanPlugin;

impl ArtifactCleanPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }

    /// The directory the backend ran in: next to the entry script.
    fn workspace_dir(context: &ExecutionContext) -> PathBuf {
        Path::new(&context.build_config.script_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Plugin for ArtifactCleanPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            name: PLUGIN_NAME,
            description: "Removes intermediate build files and descriptor leftovers",
            version: "1.0.0",
            author: "Bundlesmith Team"
        )
    }

    fn execute(&self, context: &ExecutionContext, log: &BuildLog) -> HookResult {
        let workspace = Self::workspace_dir(context);
        let mut removed = 0usize;

        let work_dir = workspace.join("build");
        if work_dir.is_dir() {
            std::fs::remove_dir_all(&work_dir)?;
            log.info(format!("Removed work directory {}", work_dir.display()));
            removed += 1;
        }

        if workspace.is_dir() {
            for entry in std::fs::read_dir(&workspace)? {
                let path = entry?.path();
                if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("spec") {
                    std::fs::remove_file(&path)?;
                    log.info(format!("Removed descriptor {}", path.display()));
                    removed += 1;
                }
            }
        } else {
            tracing::debug!(workspace = %workspace.display(), "workspace missing, nothing to scan");
        }

        if removed == 0 {
            log.info("Nothing to clean");
        } else {
            log.success(format!("Cleaned {removed} leftover item(s)"));
        }
        Ok(())
    }
}
