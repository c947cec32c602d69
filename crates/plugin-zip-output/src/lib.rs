//! # Plugin: ZIP Output
//!
//! A Bundlesmith plugin that archives the finished build output into a
//! timestamped ZIP placed next to it. Directory outputs keep their own
//! name as the top-level entry prefix, so unpacking reproduces the build
//! folder exactly.

pub mod archive;
pub mod plugin;

pub use archive::ArchiveError;
pub use plugin::{PLUGIN_NAME, ZipOutputPlugin};
