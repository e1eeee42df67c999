//! Error types for memdesk

use thiserror::Error;

/// The main error type for memdesk operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// A path resolved outside the base directory
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Outbound network errors
    #[error("Network error: {0}")]
    Network(String),
}

/// A specialized Result type for memdesk operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
