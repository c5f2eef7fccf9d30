//! Common Error Types
//!
//! One error enum for the whole crate. HTTP-level failures (non-2xx) are not
//! errors on the core path; they come back as a failed `ResponseEnvelope`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// A connection could not be resolved into a valid descriptor.
    #[error("{0}")]
    Configuration(String),

    /// The authenticator could not produce a bearer token.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Connect, timeout or body read failure below the HTTP layer.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A non-2xx response, raised only when the client opts in.
    #[error("Google Workspace API error {code}: {message}")]
    Api { code: u16, message: String },
}

impl WorkspaceError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// True for the two kinds that abort client setup.
    pub fn is_fatal_setup_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Authentication(_))
    }

    /// HTTP status carried by an `Api` error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WorkspaceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}
