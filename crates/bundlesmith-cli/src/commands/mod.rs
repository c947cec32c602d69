//! CLI command definitions and dispatch.

pub mod config;
pub mod plugins;
pub mod preset;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use bundlesmith_core::build::{BuildConfig, DataFile};
use bundlesmith_core::config::AppConfig;
use bundlesmith_core::error::AppError;
use bundlesmith_core::paths;

use crate::output::OutputFormat;

/// Bundlesmith — plugin host for the executable-packaging workbench
#[derive(Debug, Parser)]
#[command(name = "bundlesmith", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to ~/.bundlesmith/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Plugin management
    Plugins(plugins::PluginsArgs),
    /// Run the plugin passes around a finished build
    Run(run::RunArgs),
    /// Build preset management
    Preset(preset::PresetArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Resolve the configuration file path.
    pub fn config_path(&self) -> Result<PathBuf, AppError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => paths::default_config_file(),
        }
    }

    /// Load configuration from file and environment.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config_path()?)
    }

    /// Execute the CLI command
    pub fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Plugins(args) => plugins::execute(args, config, self.format),
            Commands::Run(args) => run::execute(args, config, &self.config_path()?, self.format),
            Commands::Preset(args) => preset::execute(args, self.format),
            Commands::Config(args) => {
                config::execute(args, config, &self.config_path()?, self.format)
            }
        }
    }
}

/// Build options shared by `run` and `preset save`.
#[derive(Debug, Clone, Args)]
pub struct BuildOpts {
    /// Application name used for artifact naming
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory the build writes to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Icon file embedded into the executable
    #[arg(long)]
    pub icon: Option<String>,

    /// Requirements file installed before packaging
    #[arg(long)]
    pub requirements: Option<String>,

    /// Produce a directory bundle instead of a single file
    #[arg(long)]
    pub onedir: bool,

    /// Keep a console window attached to the executable
    #[arg(long)]
    pub console: bool,

    /// Keep intermediate build files
    #[arg(long)]
    pub no_clean: bool,

    /// Module the import analyzer misses (repeatable)
    #[arg(long = "hidden-import", value_name = "MODULE")]
    pub hidden_imports: Vec<String>,

    /// Module to exclude from the bundle (repeatable)
    #[arg(long = "exclude-module", value_name = "MODULE")]
    pub exclude_modules: Vec<String>,

    /// Data file mapping, SOURCE:DEST (repeatable)
    #[arg(long = "add-data", value_name = "SOURCE:DEST")]
    pub data: Vec<String>,

    /// Extra argument passed through to the backend (repeatable)
    #[arg(long = "build-arg", value_name = "ARG")]
    pub build_args: Vec<String>,
}

impl BuildOpts {
    /// Overlay these options onto a base build configuration.
    pub fn apply(&self, build: &mut BuildConfig) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            build.app_name = name.clone();
        }
        if let Some(dir) = &self.output_dir {
            build.output_dir = dir.clone();
        }
        if let Some(icon) = &self.icon {
            build.icon_path = icon.clone();
        }
        if let Some(requirements) = &self.requirements {
            build.requirements_path = requirements.clone();
        }
        if self.onedir {
            build.one_file = false;
        }
        if self.console {
            build.console_mode = true;
        }
        if self.no_clean {
            build.clean_build = false;
        }
        build
            .hidden_imports
            .extend(self.hidden_imports.iter().cloned());
        build
            .exclude_modules
            .extend(self.exclude_modules.iter().cloned());
        for mapping in &self.data {
            let Some((source, dest)) = mapping.rsplit_once(':') else {
                return Err(AppError::validation(format!(
                    "invalid data mapping '{mapping}', expected SOURCE:DEST"
                )));
            };
            build.data_files.push(DataFile {
                source: source.to_string(),
                dest: dest.to_string(),
            });
        }
        build.additional_args.extend(self.build_args.iter().cloned());
        Ok(())
    }
}
