//! Hook runner — drives plugin passes and aggregates outcomes.
//!
//! Pre-build pass:
//! - Only build processors take part, in registration order.
//! - Each processor receives the context produced by its predecessor and
//!   may replace it. A failing processor leaves the context as it was.
//!
//! Post-build pass:
//! - Every enabled plugin runs, in registration order, regardless of
//!   individual results.
//!
//! A panicking hook is caught, reported as a failure, and the pass moves
//! on to the next plugin.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use bundlesmith_core::buildlog::BuildLog;
use bundlesmith_core::context::ExecutionContext;

use crate::registry::PluginRegistry;
use crate::traits::PluginKind;

/// Which pass produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassPhase {
    PreBuild,
    PostBuild,
}

impl PassPhase {
    fn hook_name(&self) -> &'static str {
        match self {
            Self::PreBuild => "pre-build",
            Self::PostBuild => "post-build",
        }
    }
}

impl std::fmt::Display for PassPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hook_name())
    }
}

/// How a single hook invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Succeeded,
    Failed(String),
}

/// Outcome of one plugin hook invocation.
#[derive(Debug, Clone, Serialize)]
pub struct PluginOutcome {
    /// Plugin name.
    pub plugin: String,
    /// How the hook ended.
    pub status: OutcomeStatus,
    /// How long the hook ran.
    pub elapsed: Duration,
}

impl PluginOutcome {
    /// Whether this hook succeeded.
    pub fn succeeded(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded)
    }
}

/// Aggregated result of one pass over the registry.
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    /// Which pass ran.
    pub phase: PassPhase,
    /// Per-plugin outcomes, in execution order.
    pub outcomes: Vec<PluginOutcome>,
}

impl PassReport {
    /// Whether every hook in the pass succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(PluginOutcome::succeeded)
    }

    /// Names of plugins whose hook failed, in execution order.
    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.succeeded())
            .map(|outcome| outcome.plugin.as_str())
            .collect()
    }
}

/// Runs hook passes over a registry.
///
/// Hooks run sequentially on the calling thread. The shared console
/// receives an error line for every failed hook; successful hooks announce
/// themselves, so the runner stays quiet about them.
#[derive(Debug)]
pub struct PluginRunner {
    log: Arc<BuildLog>,
}

impl PluginRunner {
    /// Creates a runner reporting through the given console.
    pub fn new(log: Arc<BuildLog>) -> Self {
        Self { log }
    }

    /// The console this runner reports through.
    pub fn log(&self) -> &Arc<BuildLog> {
        &self.log
    }

    /// Runs the pre-build pass and returns the context the build should
    /// use, along with the per-plugin report.
    pub fn run_pre_build(
        &self,
        registry: &PluginRegistry,
        context: ExecutionContext,
    ) -> (ExecutionContext, PassReport) {
        let mut current = context;
        let mut outcomes = Vec::new();

        for entry in registry.enabled_entries() {
            let info = entry.plugin.info();
            if info.kind != PluginKind::BuildProcessor {
                continue;
            }

            let started = Instant::now();
            let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
                entry.plugin.pre_build(current.clone(), &self.log)
            }));
            let status = match attempt {
                Ok(Ok(next)) => {
                    current = next;
                    debug!(plugin = %info.name, "pre-build hook succeeded");
                    OutcomeStatus::Succeeded
                }
                Ok(Err(err)) => self.report_failure(PassPhase::PreBuild, &info.name, err.to_string()),
                Err(payload) => {
                    self.report_failure(PassPhase::PreBuild, &info.name, panic_detail(payload))
                }
            };
            outcomes.push(PluginOutcome {
                plugin: info.name,
                status,
                elapsed: started.elapsed(),
            });
        }

        (
            current,
            PassReport {
                phase: PassPhase::PreBuild,
                outcomes,
            },
        )
    }

    /// Runs the post-build pass over every enabled plugin.
    pub fn run_post_build(
        &self,
        registry: &PluginRegistry,
        context: &ExecutionContext,
    ) -> PassReport {
        let mut outcomes = Vec::new();

        for entry in registry.enabled_entries() {
            let info = entry.plugin.info();

            let started = Instant::now();
            let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
                entry.plugin.execute(context, &self.log)
            }));
            let status = match attempt {
                Ok(Ok(())) => {
                    debug!(plugin = %info.name, "post-build hook succeeded");
                    OutcomeStatus::Succeeded
                }
                Ok(Err(err)) => {
                    self.report_failure(PassPhase::PostBuild, &info.name, err.to_string())
                }
                Err(payload) => {
                    self.report_failure(PassPhase::PostBuild, &info.name, panic_detail(payload))
                }
            };
            outcomes.push(PluginOutcome {
                plugin: info.name,
                status,
                elapsed: started.elapsed(),
            });
        }

        PassReport {
            phase: PassPhase::PostBuild,
            outcomes,
        }
    }

    fn report_failure(&self, phase: PassPhase, plugin: &str, detail: String) -> OutcomeStatus {
        self.log.error(format!(
            "Plugin '{}' {} hook failed: {}",
            plugin,
            phase.hook_name(),
            detail
        ));
        warn!(plugin = %plugin, phase = %phase.hook_name(), error = %detail, "hook failed");
        OutcomeStatus::Failed(detail)
    }
}

fn panic_detail(payload: Box<dyn std::any::Any + Send>) -> String {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    format!("hook panicked: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{HookError, HookResult, PreBuildResult};
    use crate::plugin_info;
    use crate::traits::{Plugin, PluginInfo};
    use bundlesmith_core::buildlog::{ConsoleBuffer, LogLevel};
    use std::sync::Mutex;

    fn context() -> ExecutionContext {
        ExecutionContext::for_build(
            Default::default(),
            Default::default(),
            Default::default(),
        )
    }

    /// Records hook invocations into a shared trace and scripts outcomes.
    #[derive(Debug)]
    struct Scripted {
        name: &'static str,
        kind: PluginKind,
        fail_execute: bool,
        panic_execute: bool,
        trace: Arc<Mutex<Vec<String>>>,
    }

    impl Scripted {
        fn new(name: &'static str, kind: PluginKind, trace: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                name,
                kind,
                fail_execute: false,
                panic_execute: false,
                trace,
            }
        }
    }

    impl Plugin for Scripted {
        fn info(&self) -> PluginInfo {
            plugin_info!(
                name: self.name,
                description: "scripted test plugin",
                version: "0.1.0",
                author: "tests",
                kind: self.kind
            )
        }

        fn execute(&self, _context: &ExecutionContext, _log: &BuildLog) -> HookResult {
            self.trace.lock().unwrap().push(format!("{}:post", self.name));
            if self.panic_execute {
                panic!("scripted panic");
            }
            if self.fail_execute {
                return Err(HookError::new("scripted failure"));
            }
            Ok(())
        }

        fn pre_build(&self, mut context: ExecutionContext, _log: &BuildLog) -> PreBuildResult {
            self.trace.lock().unwrap().push(format!("{}:pre", self.name));
            context
                .build_config
                .hidden_imports
                .push(self.name.to_string());
            Ok(context)
        }
    }

    #[test]
    fn post_build_runs_all_plugins_in_registration_order() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut registry = PluginRegistry::new();
        registry
            .register(Arc::new(Scripted::new("first", PluginKind::PostBuild, trace.clone())))
            .unwrap();
        registry
            .register(Arc::new(Scripted::new("second", PluginKind::BuildProcessor, trace.clone())))
            .unwrap();
        registry
            .register(Arc::new(Scripted::new("third", PluginKind::PostBuild, trace.clone())))
            .unwrap();

        let runner = PluginRunner::new(Arc::new(BuildLog::new()));
        let report = runner.run_post_build(&registry, &context());

        assert!(report.all_succeeded());
        assert_eq!(
            *trace.lock().unwrap(),
            vec!["first:post", "second:post", "third:post"]
        );
    }

    #[test]
    fn pre_build_skips_post_build_plugins() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut registry = PluginRegistry::new();
        registry
            .register(Arc::new(Scripted::new("plain", PluginKind::PostBuild, trace.clone())))
            .unwrap();
        registry
            .register(Arc::new(Scripted::new("proc", PluginKind::BuildProcessor, trace.clone())))
            .unwrap();

        let runner = PluginRunner::new(Arc::new(BuildLog::new()));
        let (_, report) = runner.run_pre_build(&registry, context());

        assert_eq!(*trace.lock().unwrap(), vec!["proc:pre"]);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].plugin, "proc");
    }

    #[test]
    fn pre_build_chains_context_between_processors() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut registry = PluginRegistry::new();
        registry
            .register(Arc::new(Scripted::new("a", PluginKind::BuildProcessor, trace.clone())))
            .unwrap();
        registry
            .register(Arc::new(Scripted::new("b", PluginKind::BuildProcessor, trace.clone())))
            .unwrap();

        let runner = PluginRunner::new(Arc::new(BuildLog::new()));
        let (final_context, report) = runner.run_pre_build(&registry, context());

        assert!(report.all_succeeded());
        assert_eq!(final_context.build_config.hidden_imports, vec!["a", "b"]);
    }

    #[derive(Debug)]
    struct FailingPre;

    impl Plugin for FailingPre {
        fn info(&self) -> PluginInfo {
            plugin_info!(
                name: "failing_pre",
                description: "fails its pre-build hook",
                version: "0.1.0",
                author: "tests",
                kind: PluginKind::BuildProcessor
            )
        }

        fn execute(&self, _context: &ExecutionContext, _log: &BuildLog) -> HookResult {
            Ok(())
        }

        fn pre_build(&self, mut context: ExecutionContext, _log: &BuildLog) -> PreBuildResult {
            context.build_config.hidden_imports.push("poison".into());
            Err(HookError::new("refusing the context"))
        }
    }

    #[test]
    fn failed_pre_build_does_not_replace_the_context() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut registry = PluginRegistry::new();
        registry
            .register(Arc::new(Scripted::new("a", PluginKind::BuildProcessor, trace.clone())))
            .unwrap();
        registry.register(Arc::new(FailingPre)).unwrap();
        registry
            .register(Arc::new(Scripted::new("c", PluginKind::BuildProcessor, trace.clone())))
            .unwrap();

        let runner = PluginRunner::new(Arc::new(BuildLog::new()));
        let (final_context, report) = runner.run_pre_build(&registry, context());

        assert_eq!(final_context.build_config.hidden_imports, vec!["a", "c"]);
        assert_eq!(report.failed(), vec!["failing_pre"]);
    }

    #[test]
    fn post_build_failure_does_not_stop_the_pass() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut failing = Scripted::new("bad", PluginKind::PostBuild, trace.clone());
        failing.fail_execute = true;

        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(failing)).unwrap();
        registry
            .register(Arc::new(Scripted::new("good", PluginKind::PostBuild, trace.clone())))
            .unwrap();

        let console = Arc::new(ConsoleBuffer::new());
        let mut log = BuildLog::new();
        log.attach(console.clone());

        let runner = PluginRunner::new(Arc::new(log));
        let report = runner.run_post_build(&registry, &context());

        assert_eq!(*trace.lock().unwrap(), vec!["bad:post", "good:post"]);
        assert!(!report.all_succeeded());
        assert_eq!(report.failed(), vec!["bad"]);

        let errors: Vec<_> = console
            .records()
            .into_iter()
            .filter(|r| r.level == LogLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("bad"));
        assert!(errors[0].message.contains("scripted failure"));
    }

    #[test]
    fn panicking_plugin_is_reported_and_isolated() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut panicking = Scripted::new("explosive", PluginKind::PostBuild, trace.clone());
        panicking.panic_execute = true;

        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(panicking)).unwrap();
        registry
            .register(Arc::new(Scripted::new("survivor", PluginKind::PostBuild, trace.clone())))
            .unwrap();

        let runner = PluginRunner::new(Arc::new(BuildLog::new()));
        let report = runner.run_post_build(&registry, &context());

        assert_eq!(*trace.lock().unwrap(), vec!["explosive:post", "survivor:post"]);
        assert_eq!(report.failed(), vec!["explosive"]);
        match &report.outcomes[0].status {
            OutcomeStatus::Failed(detail) => {
                assert!(detail.contains("hook panicked"));
                assert!(detail.contains("scripted panic"));
            }
            OutcomeStatus::Succeeded => panic!("expected a failure"),
        }
    }

    #[test]
    fn disabled_plugins_are_skipped_in_both_passes() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut registry = PluginRegistry::new();
        registry
            .register(Arc::new(Scripted::new("on", PluginKind::BuildProcessor, trace.clone())))
            .unwrap();
        registry
            .register(Arc::new(Scripted::new("off", PluginKind::BuildProcessor, trace.clone())))
            .unwrap();
        registry.disable("off").unwrap();

        let runner = PluginRunner::new(Arc::new(BuildLog::new()));
        let (chained, _) = runner.run_pre_build(&registry, context());
        runner.run_post_build(&registry, &chained);

        assert_eq!(*trace.lock().unwrap(), vec!["on:pre", "on:post"]);
    }

    #[test]
    fn empty_registry_produces_an_empty_report() {
        let registry = PluginRegistry::new();
        let runner = PluginRunner::new(Arc::new(BuildLog::new()));

        let report = runner.run_post_build(&registry, &context());
        assert!(report.all_succeeded());
        assert!(report.outcomes.is_empty());
    }
}
