//! Error types for storage operations.

use thiserror::Error;

/// Error type for storage operations.
///
/// This enum categorizes errors that can occur during cache storage
/// interactions into distinct groups for appropriate handling.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Internal storage error, state or computation error.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send + Sync>),

    /// Only `GET` requests can be stored in a partition.
    #[error("cannot store a {0} request in a cache partition")]
    UnsupportedMethod(http::Method),
}
