//! Build preset CLI commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use bundlesmith_core::build::BuildConfig;
use bundlesmith_core::error::AppError;
use bundlesmith_core::presets::PresetStore;

use super::BuildOpts;
use crate::output::{self, OutputFormat};

/// Arguments for preset commands
#[derive(Debug, Args)]
pub struct PresetArgs {
    /// Preset directory (defaults to the user preset store)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Preset subcommand
    #[command(subcommand)]
    pub command: PresetCommand,
}

/// Preset subcommands
#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    /// List saved presets
    List,
    /// Show a preset's build options
    Show {
        /// Preset name
        name: String,
    },
    /// Save build options under a name
    Save {
        /// Preset name
        #[arg(id = "preset_name", value_name = "NAME")]
        name: String,
        /// Entry script recorded in the preset
        #[arg(long)]
        script: Option<String>,
        #[command(flatten)]
        opts: BuildOpts,
    },
    /// Delete a preset
    Delete {
        /// Preset name
        name: String,
    },
}

/// Preset display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PresetRow {
    /// Preset name
    name: String,
}

/// Execute preset commands
pub fn execute(args: &PresetArgs, format: OutputFormat) -> Result<(), AppError> {
    let store = open_store(&args.dir)?;

    match &args.command {
        PresetCommand::List => {
            let rows: Vec<PresetRow> = store
                .list()?
                .into_iter()
                .map(|name| PresetRow { name })
                .collect();
            output::print_list(&rows, format);
        }
        PresetCommand::Show { name } => {
            let build = store.load(name)?;
            output::print_item(&build, format);
        }
        PresetCommand::Save { name, script, opts } => {
            let mut build = BuildConfig::default();
            if let Some(script) = script {
                build.script_path = script.clone();
            }
            opts.apply(&mut build)?;
            let path = store.save(name, &build)?;
            output::print_success(&format!("Preset '{}' saved to '{}'", name, path.display()));
        }
        PresetCommand::Delete { name } => {
            store.delete(name)?;
            output::print_success(&format!("Preset '{}' deleted", name));
        }
    }

    Ok(())
}

/// Open the preset store, honoring an explicit directory.
pub(crate) fn open_store(dir: &Option<PathBuf>) -> Result<PresetStore, AppError> {
    match dir {
        Some(dir) => Ok(PresetStore::new(dir)),
        None => PresetStore::open_default(),
    }
}
