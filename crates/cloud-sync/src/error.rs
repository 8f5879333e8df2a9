//! Error types for the cloud sync crate.

use thiserror::Error;

use dhanrakshak_core::errors::Error as CoreError;

/// Result type alias for cloud sync operations.
pub type Result<T> = std::result::Result<T, CloudSyncError>;

/// Errors that can occur while talking to the remote document store.
#[derive(Debug, Error)]
pub enum CloudSyncError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the document store
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid request (malformed path, unsupported value, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing identity or token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A stored document could not be mapped to or from JSON
    #[error("Document codec error: {0}")]
    Codec(String),
}

impl CloudSyncError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec(message.into())
    }
}

impl From<CloudSyncError> for CoreError {
    fn from(err: CloudSyncError) -> Self {
        CoreError::Remote(err.to_string())
    }
}
