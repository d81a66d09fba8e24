//! Error handling for the Gemini smoke test

use std::time::Duration;
use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the smoke test and its Gemini client
#[derive(Error, Debug)]
pub enum Error {
    /// The credential variable is absent or empty
    #[error("{var} not found in {}", crate::config::ENV_FILE)]
    MissingCredential {
        /// Name of the environment variable that was looked up
        var: &'static str,
    },

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// API error response
    #[error("API error (status: {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Additional error details
        details: Option<serde_json::Value>,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after {retry_after:?}")]
    RateLimit {
        /// Delay suggested by the service, if any
        retry_after: Option<Duration>,
    },

    /// Configuration error
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Writing the output failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid response format
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Whether this is the locally detected missing-credential failure,
    /// as opposed to anything raised by the service call
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Error::MissingCredential { .. })
    }
}
