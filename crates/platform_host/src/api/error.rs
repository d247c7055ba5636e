//! Transport-level error type for [`crate::DesktopApi`] calls.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Failure reported by a desktop API call.
pub enum ApiError {
    /// The request never produced a response (network down, fetch rejected, unsupported target).
    Transport(String),
    /// The server answered with a non-2xx status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, or the status text.
        message: String,
    },
    /// The response body could not be decoded.
    Decode(String),
}

impl ApiError {
    /// Returns `true` for a 404 response.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Returns the HTTP status when the server answered.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "request failed: {message}"),
            Self::Status { status, message } => write!(f, "server returned {status}: {message}"),
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}
