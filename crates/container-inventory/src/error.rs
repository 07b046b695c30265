//! Error types for container inventory

use thiserror::Error;

/// Container inventory error type
#[derive(Error, Debug)]
pub enum Error {
    /// The container runtime could not be reached
    #[error("Container runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// The runtime returned output we could not interpret
    #[error("Malformed runtime output: {0}")]
    MalformedOutput(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
