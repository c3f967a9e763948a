//! Error types for Yogamix core operations.
//!
//! Errors are grouped by [`ErrorKind`] so callers can tell apart the
//! failures a user caused (validation), the ones the network caused
//! (transport), and the ones the backend reported.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to users when a request could not reach the backend.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error - please try again";

/// Errors that can occur in Yogamix core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Required user input is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The request could not be sent or its response could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered and reported a failure.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Browser or in-memory storage rejected an operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A full-page navigation or URL rewrite failed.
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Broad error category for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed user input.
    Validation,
    /// Network or response-decoding failure.
    Transport,
    /// Failure reported by the backend.
    Backend,
    /// Storage failure.
    Storage,
    /// Navigation failure.
    Navigation,
    /// Invalid configuration, URL, or serialization.
    Configuration,
}

impl Error {
    /// Returns the category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Backend(_) => ErrorKind::Backend,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Navigation(_) => ErrorKind::Navigation,
            Self::Configuration(_) | Self::Serialization(_) | Self::InvalidUrl(_) => {
                ErrorKind::Configuration
            }
        }
    }

    /// Text suitable for showing to the user.
    ///
    /// Backend and validation messages are passed through verbatim; transport
    /// failures collapse into a generic network message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Backend(msg) => msg.clone(),
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = Error::Validation("Please enter a playlist name".to_string());
        assert_eq!(err.to_string(), "Please enter a playlist name");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_backend_user_message_is_verbatim() {
        let err = Error::Backend("invalid_track_ids".to_string());
        assert_eq!(err.user_message(), "invalid_track_ids");
        assert_eq!(err.kind(), ErrorKind::Backend);
    }

    #[test]
    fn test_transport_user_message_is_generic() {
        let err = Error::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = serde_err.into();
        assert!(matches!(err, Error::Serialization(_)));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_url_error_conversion() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
