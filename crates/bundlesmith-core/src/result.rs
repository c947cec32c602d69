//! Result alias used across the application.

use crate::error::AppError;

/// A result type with [`AppError`] as the error variant.
pub type AppResult<T> = Result<T, AppError>;
