//! Structured error handling for webhook operations.

use reqwest::StatusCode;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in webhook operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The request URL could not be assembled.
    Construction,
    /// The request could not be encoded or sent, or no response arrived.
    Transport,
    /// The operation was cancelled before it completed.
    Cancelled,
    /// The platform answered with a status outside the accepted set.
    Protocol,
    /// The response body did not match the expected record.
    Decode,
}

/// Error type for webhook operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The webhook URL could not be built from its parts.
    #[error("Invalid webhook URL: {0}")]
    Construction(String),
    /// HTTP request failed before a response was obtained.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request payload could not be serialized.
    #[error("Serialization error: {0}")]
    Encode(#[source] serde_json::Error),
    /// The cancellation token fired before the operation completed.
    #[error("Operation cancelled")]
    Cancelled,
    /// The platform responded with an unexpected status; `body` is the raw response text.
    #[error("Unexpected status {status}: {body}")]
    Protocol { status: StatusCode, body: String },
    /// The response body could not be decoded.
    #[error("Deserialization error: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Construction(_) => ErrorKind::Construction,
            Self::Transport(_) | Self::Encode(_) => ErrorKind::Transport,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Returns the response status of a protocol error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body of a protocol error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Protocol { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this error is typically retryable.
    ///
    /// The client never retries on its own; this is a hint for callers.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Protocol { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }
}
