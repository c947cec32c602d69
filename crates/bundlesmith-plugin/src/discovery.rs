//! Manifest-driven plugin discovery.
//!
//! The plugin directory holds activation manifests, one `<name>.toml` per
//! plugin. A manifest activates the catalog plugin whose name matches the
//! file stem; the plugin code itself ships with the host (or arrives
//! through the dynamic loader). Dropping a manifest in activates a plugin,
//! deleting it deactivates it on the next scan.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bundlesmith_core::paths::ensure_dir;
use bundlesmith_core::result::AppResult;

use crate::registry::PluginRegistry;
use crate::traits::Plugin;

/// Factory producing a plugin instance.
pub type PluginFactory = Box<dyn Fn() -> Arc<dyn Plugin> + Send + Sync>;

/// The plugins a host can activate, keyed by manifest stem.
///
/// Each factory must produce a plugin whose metadata name equals the stem
/// it is registered under, otherwise manifests cannot re-flag it later.
#[derive(Default)]
pub struct PluginCatalog {
    factories: BTreeMap<String, PluginFactory>,
}

impl PluginCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a factory under a manifest stem.
    pub fn add(
        &mut self,
        stem: impl Into<String>,
        factory: impl Fn() -> Arc<dyn Plugin> + Send + Sync + 'static,
    ) -> &mut Self {
        self.factories.insert(stem.into(), Box::new(factory));
        self
    }

    /// Looks up the factory for a manifest stem.
    pub fn get(&self, stem: &str) -> Option<&PluginFactory> {
        self.factories.get(stem)
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for PluginCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCatalog")
            .field("stems", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Activation manifest parsed from a `<name>.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationManifest {
    /// Whether the plugin starts enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for ActivationManifest {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_enabled() -> bool {
    true
}

/// What a discovery scan found and did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    /// Plugins activated or re-flagged, in scan order.
    pub activated: Vec<String>,
    /// Manifest stems with no catalog entry.
    pub unknown: Vec<String>,
    /// Manifests that could not be read or parsed.
    pub failed: Vec<String>,
    /// Files skipped (underscore prefix or foreign extension).
    pub ignored: usize,
}

/// Scans a directory for activation manifests and registers matching
/// catalog plugins.
///
/// The directory is created when missing, so a fresh install starts with
/// an empty one rather than an error. Files are visited in name order.
/// Stems starting with `_` are skipped, as is anything that is not a
/// `.toml` file (shared libraries are the dynamic loader's business). A
/// manifest whose stem names an already-registered plugin only applies its
/// `enabled` flag. A manifest that fails to parse is recorded and the scan
/// moves on.
pub fn discover(
    dir: &Path,
    catalog: &PluginCatalog,
    registry: &mut PluginRegistry,
) -> AppResult<DiscoveryReport> {
    ensure_dir(dir)?;

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        paths.push(entry?.path());
    }
    paths.sort();

    let mut report = DiscoveryReport::default();

    for path in paths {
        if path.is_dir() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            report.ignored += 1;
            continue;
        };
        if stem.starts_with('_') {
            debug!(file = %path.display(), "skipping underscore-prefixed file");
            report.ignored += 1;
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            debug!(file = %path.display(), "not an activation manifest, skipping");
            report.ignored += 1;
            continue;
        }

        let manifest = match read_manifest(&path) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "activation manifest rejected");
                report.failed.push(stem.to_string());
                continue;
            }
        };

        if registry.contains(stem) {
            registry.set_enabled(stem, manifest.enabled)?;
            debug!(plugin = %stem, enabled = manifest.enabled, "manifest re-flagged plugin");
            report.activated.push(stem.to_string());
            continue;
        }

        match catalog.get(stem) {
            Some(factory) => {
                let plugin = factory();
                let name = plugin.info().name;
                match registry.register(plugin) {
                    Ok(()) => {
                        registry.set_enabled(&name, manifest.enabled)?;
                        report.activated.push(name);
                    }
                    Err(err) => {
                        warn!(plugin = %name, error = %err, "activation failed");
                        report.failed.push(stem.to_string());
                    }
                }
            }
            None => {
                warn!(file = %path.display(), "no catalog plugin for manifest");
                report.unknown.push(stem.to_string());
            }
        }
    }

    Ok(report)
}

fn read_manifest(path: &Path) -> AppResult<ActivationManifest> {
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::HookResult;
    use crate::plugin_info;
    use crate::traits::PluginInfo;
    use bundlesmith_core::buildlog::BuildLog;
    use bundlesmith_core::context::ExecutionContext;

    #[derive(Debug)]
    struct Stub(&'static str);

    impl Plugin for Stub {
        fn info(&self) -> PluginInfo {
            plugin_info!(
                name: self.0,
                description: "stub",
                version: "0.1.0",
                author: "tests"
            )
        }

        fn execute(&self, _context: &ExecutionContext, _log: &BuildLog) -> HookResult {
            Ok(())
        }
    }

    fn catalog_with(stems: &'static [&'static str]) -> PluginCatalog {
        let mut catalog = PluginCatalog::new();
        for stem in stems {
            let stem = *stem;
            catalog.add(stem, move || Arc::new(Stub(stem)) as Arc<dyn Plugin>);
        }
        catalog
    }

    #[test]
    fn missing_directory_is_created_and_scan_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let plugin_dir = dir.path().join("plugins");
        let catalog = catalog_with(&["zip_output"]);
        let mut registry = PluginRegistry::new();

        let report = discover(&plugin_dir, &catalog, &mut registry).unwrap();

        assert!(plugin_dir.is_dir());
        assert!(report.activated.is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn manifest_activates_catalog_plugin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zip_output.toml"), "enabled = true\n").unwrap();

        let catalog = catalog_with(&["zip_output"]);
        let mut registry = PluginRegistry::new();
        let report = discover(dir.path(), &catalog, &mut registry).unwrap();

        assert_eq!(report.activated, vec!["zip_output"]);
        assert!(registry.is_enabled("zip_output"));
    }

    #[test]
    fn empty_manifest_defaults_to_enabled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zip_output.toml"), "").unwrap();

        let catalog = catalog_with(&["zip_output"]);
        let mut registry = PluginRegistry::new();
        discover(dir.path(), &catalog, &mut registry).unwrap();

        assert!(registry.is_enabled("zip_output"));
    }

    #[test]
    fn manifest_can_activate_disabled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zip_output.toml"), "enabled = false\n").unwrap();

        let catalog = catalog_with(&["zip_output"]);
        let mut registry = PluginRegistry::new();
        discover(dir.path(), &catalog, &mut registry).unwrap();

        assert!(registry.contains("zip_output"));
        assert!(!registry.is_enabled("zip_output"));
    }

    #[test]
    fn manifest_re_flags_already_registered_plugin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zip_output.toml"), "enabled = false\n").unwrap();

        let catalog = catalog_with(&["zip_output"]);
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(Stub("zip_output"))).unwrap();
        assert!(registry.is_enabled("zip_output"));

        let report = discover(dir.path(), &catalog, &mut registry).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(!registry.is_enabled("zip_output"));
        assert_eq!(report.activated, vec!["zip_output"]);
    }

    #[test]
    fn underscore_and_foreign_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("_disabled.toml"), "enabled = true\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a manifest").unwrap();
        std::fs::write(dir.path().join("helper.so"), [0u8; 4]).unwrap();

        let catalog = catalog_with(&["_disabled"]);
        let mut registry = PluginRegistry::new();
        let report = discover(dir.path(), &catalog, &mut registry).unwrap();

        assert!(report.activated.is_empty());
        assert_eq!(report.ignored, 3);
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_stems_are_recorded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mystery.toml"), "enabled = true\n").unwrap();
        std::fs::write(dir.path().join("zip_output.toml"), "").unwrap();

        let catalog = catalog_with(&["zip_output"]);
        let mut registry = PluginRegistry::new();
        let report = discover(dir.path(), &catalog, &mut registry).unwrap();

        assert_eq!(report.unknown, vec!["mystery"]);
        assert_eq!(report.activated, vec!["zip_output"]);
    }

    #[test]
    fn broken_manifest_is_recorded_and_scan_continues() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.toml"), "enabled = maybe???").unwrap();
        std::fs::write(dir.path().join("zip_output.toml"), "").unwrap();

        let catalog = catalog_with(&["broken", "zip_output"]);
        let mut registry = PluginRegistry::new();
        let report = discover(dir.path(), &catalog, &mut registry).unwrap();

        assert_eq!(report.failed, vec!["broken"]);
        assert_eq!(report.activated, vec!["zip_output"]);
        assert!(!registry.contains("broken"));
    }

    #[test]
    fn scan_order_is_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("charlie.toml"), "").unwrap();
        std::fs::write(dir.path().join("alpha.toml"), "").unwrap();
        std::fs::write(dir.path().join("bravo.toml"), "").unwrap();

        let catalog = catalog_with(&["alpha", "bravo", "charlie"]);
        let mut registry = PluginRegistry::new();
        let report = discover(dir.path(), &catalog, &mut registry).unwrap();

        assert_eq!(report.activated, vec!["alpha", "bravo", "charlie"]);
        let names: Vec<_> = registry.list().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    }
}
