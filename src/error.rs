//! Error types for portshuttle

use thiserror::Error;

/// Main error type for the forwarder
#[derive(Error, Debug)]
pub enum ForwardError {
    /// I/O error (network, file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Name-resolution failure for the forward target
    #[error("Resolve error: {0}")]
    Resolve(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Timeout error
    #[error("Timeout: {0}")]
    Timeout(String),
}

/// Result type alias for ForwardError
pub type Result<T> = std::result::Result<T, ForwardError>;

impl From<serde_yaml::Error> for ForwardError {
    fn from(err: serde_yaml::Error) -> Self {
        ForwardError::Config(err.to_string())
    }
}
