//! Drive the plugin hook passes around a finished build.
//!
//! The desktop front-end drives these passes itself; this command is the
//! headless equivalent. It takes the facts of a build that already ran
//! (entry script, produced artifact, outcome), assembles the registered
//! plugins, and walks them through the pre-build and post-build passes.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bundlesmith_core::build::{BuildConfig, BuildResult, BuildStatus};
use bundlesmith_core::buildlog::{BuildLog, StdoutSink};
use bundlesmith_core::config::AppConfig;
use bundlesmith_core::context::ExecutionContext;
use bundlesmith_core::error::AppError;
use bundlesmith_core::validate;
use bundlesmith_plugin::runner::{OutcomeStatus, PassReport, PluginRunner};

use super::{BuildOpts, preset};
use crate::host;
use crate::output::{self, OutputFormat};

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Entry script the build was packaged from
    pub script: String,

    /// Preset supplying the base build options
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Directory presets are stored in (defaults to the user preset store)
    #[arg(long)]
    pub preset_dir: Option<PathBuf>,

    /// Path of the artifact the build produced
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    /// Treat the build as failed instead of succeeded
    #[arg(long)]
    pub failed: bool,

    /// Error output recorded on a failed build
    #[arg(long, default_value = "")]
    pub error_message: String,

    /// Wall-clock seconds the build took
    #[arg(long, default_value_t = 0)]
    pub elapsed_secs: u64,

    #[command(flatten)]
    pub opts: BuildOpts,
}

/// Hook outcome row for table output
#[derive(Debug, Serialize, Tabled)]
struct OutcomeRow {
    /// Plugin name
    plugin: String,
    /// Pass phase
    phase: String,
    /// Hook result
    status: String,
    /// Hook duration
    elapsed: String,
}

/// Execute the run command
pub fn execute(
    args: &RunArgs,
    config: &AppConfig,
    config_path: &Path,
    format: OutputFormat,
) -> Result<(), AppError> {
    validate::validate_entry_script(&args.script)?;

    let mut build = match &args.preset {
        Some(name) => preset::open_store(&args.preset_dir)?.load(name)?,
        None => BuildConfig::default(),
    };
    build.script_path = args.script.clone();
    args.opts.apply(&mut build)?;
    validate::validate_app_name(&build.app_name)?;

    let result = BuildResult {
        status: if args.failed {
            BuildStatus::Failed
        } else {
            BuildStatus::Success
        },
        output_path: args.artifact.clone(),
        error_message: args.error_message.clone(),
        elapsed: Duration::from_secs(args.elapsed_secs),
        finished_at: Local::now(),
    };

    let registry = host::assemble_registry(config)?;
    let mut log = BuildLog::new();
    log.attach(Arc::new(StdoutSink));
    let runner = PluginRunner::new(Arc::new(log));

    let context = ExecutionContext::for_build(build, result, config.clone());
    let (context, pre_report) = runner.run_pre_build(&registry, context);

    let mut rows = outcome_rows(&pre_report);
    let mut failed: Vec<String> = pre_report.failed().iter().map(|s| s.to_string()).collect();

    let skipped_post = !context.build_result.status.is_success();
    if !skipped_post {
        let post_report = runner.run_post_build(&registry, &context);
        rows.extend(outcome_rows(&post_report));
        failed.extend(post_report.failed().iter().map(|s| s.to_string()));
    }

    remember_project(config, config_path, &args.script)?;

    output::print_list(&rows, format);
    if format == OutputFormat::Table {
        if skipped_post {
            output::print_warning("Build did not succeed; post-build plugins were skipped");
        }
        if failed.is_empty() {
            output::print_success(&format!("{} hook(s) completed", rows.len()));
        } else {
            output::print_warning(&format!(
                "{} hook(s) failed: {}",
                failed.len(),
                failed.join(", ")
            ));
        }
    }

    Ok(())
}

fn outcome_rows(report: &PassReport) -> Vec<OutcomeRow> {
    report
        .outcomes
        .iter()
        .map(|outcome| OutcomeRow {
            plugin: outcome.plugin.clone(),
            phase: report.phase.to_string(),
            status: match &outcome.status {
                OutcomeStatus::Succeeded => "ok".to_string(),
                OutcomeStatus::Failed(detail) => format!("failed: {detail}"),
            },
            elapsed: format!("{:?}", outcome.elapsed),
        })
        .collect()
}

/// Record the script in the recent projects list.
fn remember_project(config: &AppConfig, config_path: &Path, script: &str) -> Result<(), AppError> {
    let mut updated = config.clone();
    updated.general.add_recent_project(script);
    if let Some(dir) = Path::new(script).parent().and_then(|p| p.to_str()) {
        if !dir.is_empty() {
            updated.general.last_script_dir = dir.to_string();
        }
    }
    updated.save(config_path)
}
