//! Configuration management CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use bundlesmith_core::config::AppConfig;
use bundlesmith_core::error::AppError;
use bundlesmith_core::paths;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate the configuration file
    Validate,
    /// Write a default configuration file
    Init {
        /// Output file path (defaults to the active config path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &Path,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            output::print_item(config, format);
        }
        ConfigCommand::Validate => {
            output::print_success(&format!(
                "Configuration '{}' is valid",
                config_path.display()
            ));
            output::print_kv("Theme", &config.general.theme);
            output::print_kv("Plugin directory", &config.plugins.directory);
            output::print_kv("Auto load", &config.plugins.auto_load.to_string());
            output::print_kv(
                "Upload endpoint",
                if config.plugins.http_upload.endpoint.is_empty() {
                    "(unset)"
                } else {
                    config.plugins.http_upload.endpoint.as_str()
                },
            );
            output::print_kv("Log level", &config.logging.level);
            output::print_kv("Log format", &config.logging.format);
        }
        ConfigCommand::Init { output: out_path } => {
            let target = out_path.as_deref().unwrap_or(config_path);
            if target.exists() {
                return Err(AppError::conflict(format!(
                    "config file '{}' already exists",
                    target.display()
                )));
            }
            if let Some(parent) = target.parent() {
                paths::ensure_dir(parent)?;
            }
            let template = include_str!("../../../../config/default.toml");
            std::fs::write(target, template)?;
            output::print_success(&format!(
                "Default config written to '{}'",
                target.display()
            ));
        }
    }

    Ok(())
}
