//! # bundlesmith-plugin-sdk
//!
//! SDK for developing Bundlesmith plugins.
//!
//! ## Quick Start
//!
//! A post-build plugin implements [`Plugin`](prelude::Plugin) and reports
//! its outcome through the return value. Progress lines go to the shared
//! build console.
//!
//! ```rust,ignore
//! use bundlesmith_plugin_sdk::prelude::*;
//!
//! #[derive(Debug)]
//! struct ChecksumPlugin;
//!
//! impl Plugin for ChecksumPlugin {
//!     fn info(&self) -> PluginInfo {
//!         plugin_info!(
//!             name: "checksum",
//!             description: "Writes a SHA-256 digest next to the artifact",
//!             version: "1.0.0",
//!             author: "Developer"
//!         )
//!     }
//!
//!     fn execute(&self, context: &ExecutionContext, log: &BuildLog) -> HookResult {
//!         let Some(artifact) = context.output_path.as_deref() else {
//!             return Err(HookError::new("no build output to digest"));
//!         };
//!         log.info(format!("Digesting {}", artifact.display()));
//!         // ... hash the artifact, write `<artifact>.sha256` ...
//!         log.success("Digest written");
//!         Ok(())
//!     }
//! }
//! ```
//!
//! A plugin that also wants to adjust the build before it runs implements
//! [`BuildProcessor`](prelude::BuildProcessor) instead and registers
//! through [`ProcessorAdapter`](prelude::ProcessorAdapter). Both hooks
//! have default bodies, so only the interesting one needs writing:
//!
//! ```rust,ignore
//! #[derive(Debug)]
//! struct ImportInjector;
//!
//! impl BuildProcessor for ImportInjector {
//!     fn info(&self) -> PluginInfo {
//!         plugin_info!(
//!             name: "import_injector",
//!             description: "Forces packages the analyzer misses",
//!             version: "1.0.0",
//!             author: "Developer"
//!         )
//!     }
//!
//!     fn pre_build(&self, mut context: ExecutionContext, log: &BuildLog) -> PreBuildResult {
//!         context.build_config.hidden_imports.push("pkg_resources".into());
//!         log.info("Injected hidden import pkg_resources");
//!         Ok(context)
//!     }
//! }
//!
//! let plugin = ProcessorAdapter::wrap(std::sync::Arc::new(ImportInjector));
//! ```

/// Prelude for convenient imports.
pub mod prelude {
    pub use bundlesmith_core::build::{BuildConfig, BuildResult, BuildStatus};
    pub use bundlesmith_core::buildlog::{BuildLog, LogLevel};
    pub use bundlesmith_core::context::ExecutionContext;

    pub use bundlesmith_plugin::outcome::{HookError, HookResult, PreBuildResult};
    pub use bundlesmith_plugin::traits::{
        BuildProcessor, FnPlugin, Plugin, PluginInfo, PluginKind, ProcessorAdapter,
    };

    pub use bundlesmith_plugin::plugin_info;
}
