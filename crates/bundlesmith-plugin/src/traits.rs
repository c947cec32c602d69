//! The plugin contract and the build-processor convenience layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bundlesmith_core::buildlog::BuildLog;
use bundlesmith_core::context::ExecutionContext;

use crate::outcome::{HookResult, PreBuildResult};

/// Which hooks a plugin participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    /// Runs once, after the build finishes.
    PostBuild,
    /// Runs before the build (and may rewrite the context) as well as
    /// after it.
    BuildProcessor,
}

impl PluginKind {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostBuild => "post_build",
            Self::BuildProcessor => "build_processor",
        }
    }
}

impl std::fmt::Display for PluginKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Plugin version string.
    pub version: String,
    /// Author or maintainer.
    pub author: String,
    /// Which hooks the plugin participates in.
    pub kind: PluginKind,
    /// Whether the plugin starts enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Trait that all plugins implement.
///
/// Hooks run synchronously on the build thread and report their outcome
/// through the return value. Progress messages go to the shared console.
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called once after the build finishes.
    fn execute(&self, context: &ExecutionContext, log: &BuildLog) -> HookResult;

    /// Called before the build starts. Only invoked for
    /// [`PluginKind::BuildProcessor`] plugins; the default passes the
    /// context through unchanged.
    fn pre_build(&self, context: ExecutionContext, _log: &BuildLog) -> PreBuildResult {
        Ok(context)
    }
}

/// Convenience trait for plugins that hook both sides of a build.
///
/// Both hooks have default bodies, so an implementation overrides only the
/// side it cares about. Register through [`ProcessorAdapter`].
pub trait BuildProcessor: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata. The adapter pins the kind to
    /// [`PluginKind::BuildProcessor`].
    fn info(&self) -> PluginInfo;

    /// Called before the build starts. Defaults to passing the context
    /// through unchanged.
    fn pre_build(&self, context: ExecutionContext, _log: &BuildLog) -> PreBuildResult {
        Ok(context)
    }

    /// Called after the build finishes. Defaults to doing nothing.
    fn post_build(&self, _context: &ExecutionContext, _log: &BuildLog) -> HookResult {
        Ok(())
    }
}

/// Wrapper that adapts a [`BuildProcessor`] to the [`Plugin`] trait.
#[derive(Debug)]
pub struct ProcessorAdapter {
    /// The inner processor.
    inner: Arc<dyn BuildProcessor>,
}

impl ProcessorAdapter {
    /// Creates a new adapter wrapping a build processor.
    pub fn new(processor: Arc<dyn BuildProcessor>) -> Self {
        Self { inner: processor }
    }

    /// Wraps a build processor into an `Arc<dyn Plugin>`.
    pub fn wrap(processor: Arc<dyn BuildProcessor>) -> Arc<dyn Plugin> {
        Arc::new(Self::new(processor))
    }
}

impl Plugin for ProcessorAdapter {
    fn info(&self) -> PluginInfo {
        let mut info = self.inner.info();
        info.kind = PluginKind::BuildProcessor;
        info
    }

    fn execute(&self, context: &ExecutionContext, log: &BuildLog) -> HookResult {
        self.inner.post_build(context, log)
    }

    fn pre_build(&self, context: ExecutionContext, log: &BuildLog) -> PreBuildResult {
        self.inner.pre_build(context, log)
    }
}

/// A closure-based plugin for quick hook creation.
pub struct FnPlugin {
    /// Metadata reported for the closure.
    info: PluginInfo,
    /// Hook body.
    hook: Arc<dyn Fn(&ExecutionContext, &BuildLog) -> HookResult + Send + Sync>,
}

impl std::fmt::Debug for FnPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPlugin")
            .field("info", &self.info)
            .field("hook", &"<closure>")
            .finish()
    }
}

impl FnPlugin {
    /// Creates a post-build plugin from a closure.
    pub fn new<F>(info: PluginInfo, hook: F) -> Self
    where
        F: Fn(&ExecutionContext, &BuildLog) -> HookResult + Send + Sync + 'static,
    {
        Self {
            info,
            hook: Arc::new(hook),
        }
    }
}

impl Plugin for FnPlugin {
    fn info(&self) -> PluginInfo {
        self.info.clone()
    }

    fn execute(&self, context: &ExecutionContext, log: &BuildLog) -> HookResult {
        (self.hook)(context, log)
    }
}
