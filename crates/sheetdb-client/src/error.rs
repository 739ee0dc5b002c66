//! Error types for the sheetdb client.

use thiserror::Error;

use crate::provider::ProviderFailure;

/// Result type alias using [`ClientError`]
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors a query or refresh request can produce.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// Request rejected before any fetch was issued
    #[error("invalid request: {0}")]
    Validation(String),

    /// Coordinate or zone error from the core
    #[error(transparent)]
    Core(#[from] sheetdb_core::Error),

    /// The document service reported a failure
    #[error(transparent)]
    Provider(#[from] ProviderFailure),
}
