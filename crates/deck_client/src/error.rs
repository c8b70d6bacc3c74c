use thiserror::Error;

/// The single error surface of the client. `Display` shows only the
/// human-readable message; callers present it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

/// Exactly two kinds: the request never completed, or the backend answered
/// with a non-2xx status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Transport failure, including an undecodable success body.
    Network,
    /// Application error carrying the HTTP status code.
    Status(u16),
}

impl ApiError {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: message.into(),
        }
    }

    pub(crate) fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Status(code),
            message: message.into(),
        }
    }
}
