//! Core error types for the split workflow.
//!
//! This module defines storage-agnostic error types. Errors coming from the
//! REST backend or a local store are converted to these types by the
//! collaborator implementing the repository traits.

use thiserror::Error;

use crate::splits::{RatioError, SplitError};

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the split workflow.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for repository operations.
///
/// The `String` payloads let implementors convert transport or database
/// errors without leaking their types into the core.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A request to the backing store failed.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backing store rejected the payload.
    #[error("Rejected by backend: {0}")]
    Rejected(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

// === From implementations for common error types ===

impl From<RatioError> for Error {
    fn from(err: RatioError) -> Self {
        Error::Split(SplitError::Ratio(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
