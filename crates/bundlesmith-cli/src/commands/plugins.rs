//! Plugin management CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use bundlesmith_core::config::AppConfig;
use bundlesmith_core::error::AppError;
use bundlesmith_core::paths;
use bundlesmith_plugin::discovery::{self, ActivationManifest};

use crate::host;
use crate::output::{self, OutputFormat};

/// Arguments for plugin commands
#[derive(Debug, Args)]
pub struct PluginsArgs {
    /// Plugin subcommand
    #[command(subcommand)]
    pub command: PluginsCommand,
}

/// Plugin subcommands
#[derive(Debug, Subcommand)]
pub enum PluginsCommand {
    /// List registered plugins
    List,
    /// Show one plugin's metadata
    Info {
        /// Plugin name
        name: String,
    },
    /// Write an activation manifest enabling a plugin
    Enable {
        /// Plugin name
        name: String,
    },
    /// Write an activation manifest disabling a plugin
    Disable {
        /// Plugin name
        name: String,
    },
    /// Scan the plugin directory and report what it contains
    Scan,
}

/// Plugin display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PluginRow {
    /// Plugin name
    name: String,
    /// Version
    version: String,
    /// Hook kind
    kind: String,
    /// Enabled flag
    enabled: bool,
    /// Description
    description: String,
}

/// Execute plugin commands
pub fn execute(
    args: &PluginsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        PluginsCommand::List => {
            let registry = host::assemble_registry(config)?;
            let rows: Vec<PluginRow> = registry
                .list()
                .into_iter()
                .map(|info| PluginRow {
                    name: info.name,
                    version: info.version,
                    kind: info.kind.as_str().to_string(),
                    enabled: info.enabled,
                    description: info.description,
                })
                .collect();
            output::print_list(&rows, format);
        }
        PluginsCommand::Info { name } => {
            let registry = host::assemble_registry(config)?;
            let info = registry
                .list()
                .into_iter()
                .find(|info| info.name == *name)
                .ok_or_else(|| {
                    AppError::not_found(format!("plugin '{name}' is not registered"))
                })?;
            output::print_item(&info, format);
        }
        PluginsCommand::Enable { name } => {
            let path = write_manifest(config, name, true)?;
            output::print_success(&format!(
                "Plugin '{}' enabled via '{}'",
                name,
                path.display()
            ));
        }
        PluginsCommand::Disable { name } => {
            let path = write_manifest(config, name, false)?;
            output::print_success(&format!(
                "Plugin '{}' disabled via '{}'",
                name,
                path.display()
            ));
        }
        PluginsCommand::Scan => {
            let mut registry = host::builtin_registry(config)?;
            let report = discovery::discover(
                Path::new(&config.plugins.directory),
                &host::builtin_catalog(),
                &mut registry,
            )?;
            match format {
                OutputFormat::Json => output::print_item(&report, format),
                OutputFormat::Table => {
                    output::print_kv("Directory", &config.plugins.directory);
                    output::print_kv("Activated", &join_or_dash(&report.activated));
                    output::print_kv("Unknown", &join_or_dash(&report.unknown));
                    output::print_kv("Failed", &join_or_dash(&report.failed));
                    output::print_kv("Ignored", &report.ignored.to_string());
                }
            }
        }
    }

    Ok(())
}

/// Write an activation manifest for the plugin, creating the directory.
fn write_manifest(config: &AppConfig, name: &str, enabled: bool) -> Result<PathBuf, AppError> {
    let dir = Path::new(&config.plugins.directory);
    paths::ensure_dir(dir)?;
    let path = dir.join(format!("{name}.toml"));
    std::fs::write(&path, toml::to_string(&ActivationManifest { enabled })?)?;
    Ok(path)
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
