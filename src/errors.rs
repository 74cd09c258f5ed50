//! Error types shared across the toolkit

use thiserror::Error;

/// Errors that can occur in toolkit operations
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// Reducing an empty sequence with no seed
    #[error("empty sequence: reduction requires at least one element or an explicit seed")]
    EmptySequence,

    /// Invalid argument value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid numeric range
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Unsubscribe attempt with an unknown subscription id
    #[error("unknown subscription: {0}")]
    UnknownSubscription(String),

    /// Timeout error
    #[error("operation timed out: {0}")]
    Timeout(String),

    /// Deferred value dropped before completion
    #[error("deferred value was dropped before completion")]
    Canceled,
}

/// Result type for toolkit operations
pub type ToolkitResult<T> = Result<T, ToolkitError>;

impl From<chrono::ParseError> for ToolkitError {
    fn from(err: chrono::ParseError) -> Self {
        ToolkitError::InvalidArgument(err.to_string())
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for ToolkitError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        ToolkitError::Canceled
    }
}

impl From<tokio::time::error::Elapsed> for ToolkitError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ToolkitError::Timeout(err.to_string())
    }
}
