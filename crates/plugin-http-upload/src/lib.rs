//! # Plugin: HTTP Upload
//!
//! A Bundlesmith plugin that POSTs the built executable to a configured
//! HTTP endpoint after a successful build. The endpoint and timeout come
//! from the `[plugins.http_upload]` section of the application
//! configuration.

pub mod plugin;
pub mod resolve;

pub use plugin::{HttpUploadPlugin, PLUGIN_NAME};
