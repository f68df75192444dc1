//! Error types for the phonebook system
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for phonebook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the phonebook system
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was missing or empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// An entry with the same name already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No entry matched the requested id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure talking to the directory server
    #[error("HTTP error: {0}")]
    Http(String),

    /// The directory server answered with a non-success status
    #[error("Server responded with {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, if any
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an error for a non-success response
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = Error::status(404, "Person not found");
        assert_eq!(err.to_string(), "Server responded with 404: Person not found");
    }

    #[test]
    fn test_anyhow_conversion_keeps_message() {
        let err: Error = anyhow::anyhow!("backend unavailable").into();
        assert!(matches!(err, Error::Other(ref message) if message == "backend unavailable"));
    }
}
