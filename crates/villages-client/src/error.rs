//! Client error types.

use thiserror::Error;

use villages_core::{FormatError, ProcessingError};
use villages_providers::ProviderError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that end a run with exit code 1.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Token, session or events API failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The API response had no usable `events` list.
    #[error("processing error: {0}")]
    Processing(#[from] ProcessingError),

    /// Rendering failed.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The raw response could not be serialized.
    #[error("failed to serialize raw response: {0}")]
    Json(#[from] serde_json::Error),
}
