//! # bundlesmith-plugin
//!
//! Plugin framework for Bundlesmith. Provides:
//!
//! - The [`Plugin`] contract plus a build-processor convenience layer
//! - A registry that keeps plugins in registration order
//! - A hook runner with failure isolation and per-pass reports
//! - Manifest-driven discovery from the plugin directory
//! - Optional dynamic loading via `libloading`

pub mod discovery;
pub mod loader;
mod macros;
pub mod outcome;
pub mod prelude;
pub mod registry;
pub mod runner;
pub mod traits;

pub use discovery::{ActivationManifest, DiscoveryReport, PluginCatalog, discover};
pub use loader::DynamicLoader;
pub use outcome::{HookError, HookResult, PreBuildResult};
pub use registry::PluginRegistry;
pub use runner::{OutcomeStatus, PassPhase, PassReport, PluginOutcome, PluginRunner};
pub use traits::{BuildProcessor, FnPlugin, Plugin, PluginInfo, PluginKind, ProcessorAdapter};
