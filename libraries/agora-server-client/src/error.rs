//! Error types for the Agora API client.

use thiserror::Error;

/// Errors that can occur when talking to the community API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded its timeout and was aborted
    #[error("Request timed out")]
    Timeout,

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Request requires an authenticated session (401)
    #[error("Authentication required")]
    AuthRequired,

    /// Login was rejected (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Failed to parse a server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid API base URL
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Classify a transport-level reqwest failure.
///
/// Timeouts become [`ApiError::Timeout`] so callers can apply the
/// degrade-to-previous-state policy; connect failures become
/// [`ApiError::Unreachable`].
pub(crate) fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_connect() {
        ApiError::Unreachable(err.to_string())
    } else {
        ApiError::Request(err)
    }
}
