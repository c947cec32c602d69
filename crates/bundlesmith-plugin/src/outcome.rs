//! Hook outcome types.
//!
//! Hooks report success or failure explicitly; the runner never infers an
//! outcome from log output.

use thiserror::Error;

use bundlesmith_core::context::ExecutionContext;

/// Error produced by a plugin hook.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HookError {
    /// What went wrong, in operator-facing terms.
    pub message: String,
    /// Underlying cause, when one exists.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HookError {
    /// Create a hook error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a hook error with an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<std::io::Error> for HookError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(format!("I/O error: {err}"), err)
    }
}

impl From<bundlesmith_core::AppError> for HookError {
    fn from(err: bundlesmith_core::AppError) -> Self {
        Self::with_source(err.message.clone(), err)
    }
}

/// Outcome of a post-build hook.
pub type HookResult = Result<(), HookError>;

/// Outcome of a pre-build hook. Success carries the context the next
/// processor (and ultimately the build) sees.
pub type PreBuildResult = Result<ExecutionContext, HookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_message_alone() {
        let err = HookError::new("archive failed");
        assert_eq!(err.to_string(), "archive failed");
    }

    #[test]
    fn io_errors_convert_with_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = HookError::from(io);
        assert!(err.message.contains("gone"));
        assert!(err.source.is_some());
    }
}
