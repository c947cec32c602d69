//! Plugin registry — stores registered plugin instances in activation order.

use std::sync::Arc;

use tracing::info;

use bundlesmith_core::{AppError, AppResult};

use crate::traits::{Plugin, PluginInfo};

/// Entry in the plugin registry.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// The plugin instance.
    pub plugin: Arc<dyn Plugin>,
    /// Whether hook passes run this plugin.
    pub enabled: bool,
}

/// Registry of plugins, kept in registration order.
///
/// Hook passes walk the registry front to back, so registration order is
/// execution order. The registry is owned by the host and mutated between
/// passes, never during one.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: Vec<RegistryEntry>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin.
    ///
    /// The plugin's metadata must carry a non-empty name, description,
    /// version and author, and the name must not already be taken. The
    /// entry starts with the enabled flag the metadata declares.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> AppResult<()> {
        let info = plugin.info();
        validate_info(&info)?;

        if self.contains(&info.name) {
            return Err(AppError::conflict(format!(
                "plugin '{}' is already registered",
                info.name
            )));
        }

        info!(
            plugin = %info.name,
            version = %info.version,
            kind = %info.kind,
            "Registering plugin"
        );

        self.entries.push(RegistryEntry {
            plugin,
            enabled: info.enabled,
        });

        Ok(())
    }

    /// Removes a plugin by name, returning the instance.
    pub fn unregister(&mut self, name: &str) -> AppResult<Arc<dyn Plugin>> {
        let index = self
            .position(name)
            .ok_or_else(|| AppError::not_found(format!("plugin '{name}' not found")))?;
        let entry = self.entries.remove(index);

        info!(plugin = %name, "Plugin unregistered");

        Ok(entry.plugin)
    }

    /// Gets a plugin by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.position(name).map(|i| self.entries[i].plugin.clone())
    }

    /// Checks whether a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata for every registered plugin, in registration order.
    ///
    /// The `enabled` field reflects the registry's live flag, not the
    /// value the plugin was registered with.
    pub fn list(&self) -> Vec<PluginInfo> {
        self.entries
            .iter()
            .map(|entry| {
                let mut info = entry.plugin.info();
                info.enabled = entry.enabled;
                info
            })
            .collect()
    }

    /// Enables a plugin by name.
    pub fn enable(&mut self, name: &str) -> AppResult<()> {
        self.set_enabled(name, true)
    }

    /// Disables a plugin by name. Disabled plugins are skipped by every
    /// hook pass but stay registered.
    pub fn disable(&mut self, name: &str) -> AppResult<()> {
        self.set_enabled(name, false)
    }

    /// Sets the enabled flag for a plugin by name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> AppResult<()> {
        let index = self
            .position(name)
            .ok_or_else(|| AppError::not_found(format!("plugin '{name}' not found")))?;
        self.entries[index].enabled = enabled;
        Ok(())
    }

    /// Checks whether a plugin is registered and enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.position(name)
            .map(|i| self.entries[i].enabled)
            .unwrap_or(false)
    }

    /// Enabled entries in registration order.
    pub(crate) fn enabled_entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter().filter(|entry| entry.enabled)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.plugin.info().name == name)
    }
}

fn validate_info(info: &PluginInfo) -> AppResult<()> {
    let fields = [
        ("name", &info.name),
        ("description", &info.description),
        ("version", &info.version),
        ("author", &info.author),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(AppError::validation(format!(
                "plugin metadata field '{field}' must not be empty"
            )));
        }
    }
    Ok(())
}
