//! Error types for the session cache.

use agora_server_client::ApiError;
use thiserror::Error;

/// Errors surfaced by session operations.
///
/// `Clone` because a single refresh outcome is fanned out to every caller
/// that joined the in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The API host could not be reached
    #[error("Session service unreachable: {0}")]
    Unreachable(String),

    /// The API answered with a non-success, non-401 status
    #[error("Session request failed ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other client-side failure
    #[error("Session request failed: {0}")]
    Request(String),
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unreachable(message) => SessionError::Unreachable(message),
            ApiError::Server { status, message } => SessionError::Server { status, message },
            other => SessionError::Request(other.to_string()),
        }
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
