//! Error types for the service directory

use thiserror::Error;

/// Service directory error type
///
/// Most failure modes in this crate degrade to defaults instead of
/// surfacing here: an unreachable runtime yields an empty container set, a
/// corrupt persisted document yields its default, and a malformed label
/// value yields the field default. What remains are genuine write failures
/// and invalid caller input.
#[derive(Error, Debug)]
pub enum Error {
    /// A manual entry failed validation
    #[error("Invalid manual entry: {0}")]
    InvalidEntry(String),

    /// I/O error while persisting state
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
