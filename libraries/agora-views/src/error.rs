//! User-facing errors raised at the view-controller boundary.

use agora_server_client::ApiError;
use thiserror::Error;

/// How a view error should be treated by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewErrorKind {
    /// Bad local input; nothing was sent to the server
    Validation,
    /// The operation needs an authenticated session
    NeedsLogin,
    /// The API call failed; `retryable` hints whether trying again is
    /// likely to help (timeouts and unreachable hosts are)
    Api {
        /// Whether a retry is worth offering
        retryable: bool,
    },
}

/// A presentable error: every API failure is converted to one of these at
/// the controller boundary, so nothing upstream ever sees a raw transport
/// error or a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ViewError {
    message: String,
    kind: ViewErrorKind,
}

impl ViewError {
    /// Bad local input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ViewErrorKind::Validation,
        }
    }

    /// The operation needs a signed-in user.
    pub fn needs_login(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ViewErrorKind::NeedsLogin,
        }
    }

    /// Wrap an API failure with a context-specific user message.
    ///
    /// A 401 overrides the message with a sign-in hint; timeouts and
    /// unreachable hosts keep the message but are marked retryable.
    pub(crate) fn from_api(err: &ApiError, message: &str) -> Self {
        match err {
            ApiError::AuthRequired => Self::needs_login("Please sign in and try again."),
            ApiError::Timeout | ApiError::Unreachable(_) => Self {
                message: message.to_string(),
                kind: ViewErrorKind::Api { retryable: true },
            },
            _ => Self {
                message: message.to_string(),
                kind: ViewErrorKind::Api { retryable: false },
            },
        }
    }

    /// The message to show the user.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error category.
    pub fn kind(&self) -> ViewErrorKind {
        self.kind
    }

    /// Whether offering a retry makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ViewErrorKind::Api { retryable: true })
    }
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_are_retryable() {
        let err = ViewError::from_api(&ApiError::Timeout, "Could not load posts.");
        assert!(err.is_retryable());
        assert_eq!(err.message(), "Could not load posts.");
    }

    #[test]
    fn unauthorized_becomes_needs_login() {
        let err = ViewError::from_api(&ApiError::AuthRequired, "Could not load posts.");
        assert_eq!(err.kind(), ViewErrorKind::NeedsLogin);
    }

    #[test]
    fn server_errors_are_not_retryable() {
        let err = ViewError::from_api(
            &ApiError::Server {
                status: 500,
                message: "boom".to_string(),
            },
            "Could not load posts.",
        );
        assert!(!err.is_retryable());
    }
}
