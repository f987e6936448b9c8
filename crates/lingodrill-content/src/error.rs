//! Content client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Content API.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The token was missing or rejected (HTTP 401/403).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body could not be used.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A local file to upload could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },
}
