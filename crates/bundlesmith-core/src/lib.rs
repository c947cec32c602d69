//! # bundlesmith-core
//!
//! Core crate for Bundlesmith. Contains the build data model, the per-build
//! execution context, the build console log, configuration schemas, input
//! validation, well-known filesystem locations, preset persistence, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Bundlesmith crates.

pub mod build;
pub mod buildlog;
pub mod config;
pub mod context;
pub mod error;
pub mod paths;
pub mod presets;
pub mod result;
pub mod validate;

pub use error::AppError;
pub use result::AppResult;
