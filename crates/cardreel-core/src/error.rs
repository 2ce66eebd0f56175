//! Core error types

use thiserror::Error;

/// Errors raised by the sequencing and loudness operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Caller passed a value outside what the operation accepts
    /// (unknown strategy or mode name, empty sample set for a
    /// data-derived target).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
