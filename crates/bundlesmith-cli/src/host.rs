//! Host-side plugin assembly.
//!
//! The CLI registers the bundled plugins directly, then lets manifest
//! discovery activate or re-flag anything under the plugin directory.

use std::path::Path;
use std::sync::Arc;

use bundlesmith_core::config::AppConfig;
use bundlesmith_core::error::AppError;
use bundlesmith_plugin::discovery::{self, PluginCatalog};
use bundlesmith_plugin::registry::PluginRegistry;
use bundlesmith_plugin::traits::Plugin;

use plugin_artifact_clean::ArtifactCleanPlugin;
use plugin_http_upload::HttpUploadPlugin;
use plugin_zip_output::ZipOutputPlugin;

/// Catalog of every plugin shipped with the workspace.
pub fn builtin_catalog() -> PluginCatalog {
    let mut catalog = PluginCatalog::new();
    catalog.add(plugin_zip_output::PLUGIN_NAME, || {
        Arc::new(ZipOutputPlugin::new()) as Arc<dyn Plugin>
    });
    catalog.add(plugin_artifact_clean::PLUGIN_NAME, || {
        Arc::new(ArtifactCleanPlugin::new()) as Arc<dyn Plugin>
    });
    catalog.add(plugin_http_upload::PLUGIN_NAME, || {
        Arc::new(HttpUploadPlugin::new()) as Arc<dyn Plugin>
    });
    catalog
}

/// Registry pre-loaded with the bundled plugins.
///
/// The upload plugin only joins when an endpoint is configured; without
/// one it could never do anything but fail. A manifest in the plugin
/// directory can still activate it explicitly.
pub fn builtin_registry(config: &AppConfig) -> Result<PluginRegistry, AppError> {
    let mut registry = PluginRegistry::new();
    registry.register(Arc::new(ZipOutputPlugin::new()))?;
    registry.register(Arc::new(ArtifactCleanPlugin::new()))?;
    if !config.plugins.http_upload.endpoint.trim().is_empty() {
        registry.register(Arc::new(HttpUploadPlugin::new()))?;
    }
    Ok(registry)
}

/// Full host assembly: bundled plugins plus manifest discovery.
pub fn assemble_registry(config: &AppConfig) -> Result<PluginRegistry, AppError> {
    let mut registry = builtin_registry(config)?;
    if config.plugins.auto_load {
        let report = discovery::discover(
            Path::new(&config.plugins.directory),
            &builtin_catalog(),
            &mut registry,
        )?;
        tracing::debug!(
            activated = report.activated.len(),
            unknown = report.unknown.len(),
            failed = report.failed.len(),
            ignored = report.ignored,
            "plugin discovery finished"
        );
    }
    Ok(registry)
}
