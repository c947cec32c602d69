//! Prelude for convenient imports in plugin crates.

pub use bundlesmith_core::buildlog::{BuildLog, LogLevel};
pub use bundlesmith_core::context::ExecutionContext;

pub use crate::outcome::{HookError, HookResult, PreBuildResult};
pub use crate::traits::{BuildProcessor, FnPlugin, Plugin, PluginInfo, PluginKind, ProcessorAdapter};

pub use crate::plugin_info;
