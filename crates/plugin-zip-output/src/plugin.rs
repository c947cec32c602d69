//! ZIP output plugin — hooks the post-build pass.

use std::path::Path;

use bundlesmith_core::buildlog::BuildLog;
use bundlesmith_core::context::ExecutionContext;
use bundlesmith_core::validate::sanitize_filename;
use bundlesmith_plugin::outcome::{HookError, HookResult};
use bundlesmith_plugin::plugin_info;
use bundlesmith_plugin::traits::{Plugin, PluginInfo};

use crate::archive;

/// Registered name and manifest stem of this plugin.
pub const PLUGIN_NAME: &str = "zip_output";

/// Archives the finished build output into a timestamped ZIP placed next
/// to it, so the build is ready to hand over the moment it finishes.
#[derive(Debug, Default)]
pub struct ZipOutputPlugin;

impl ZipOutputPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }

    /// Archive stem: the configured app name when set, otherwise the
    /// output's own name.
    fn archive_stem(context: &ExecutionContext) -> String {
        let app_name = context.build_config.app_name.trim();
        if !app_name.is_empty() {
            return sanitize_filename(app_name);
        }
        context
            .output_path
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
            .map(sanitize_filename)
            .unwrap_or_else(|| "build".to_string())
    }
}

impl Plugin for ZipOutputPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            name: PLUGIN_NAME,
            description: "Archives the build output into a timestamped ZIP",
            version: "1.0.0",
            author: "Bundlesmith Team"
        )
    }

    fn execute(&self, context: &ExecutionContext, log: &BuildLog) -> HookResult {
        let Some(output) = context.output_path.as_deref() else {
            return Err(HookError::new("no build output to archive"));
        };

        let destination = output.parent().unwrap_or_else(|| Path::new("."));
        let name = archive::timestamped_name(
            &Self::archive_stem(context),
            context.build_result.finished_at,
        );
        let archive_path = destination.join(&name);

        log.info(format!(
            "Archiving {} into {}",
            output.display(),
            archive_path.display()
        ));

        let entries = archive::pack(output, &archive_path)
            .map_err(|e| HookError::with_source(format!("archiving failed: {e}"), e))?;

        log.success(format!("Archived {entries} file(s) into {name}"));
        Ok(())
    }
}
