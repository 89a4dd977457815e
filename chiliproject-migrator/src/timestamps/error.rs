//! Timestamp map error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the timestamp map.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// Failed to read or write the file.
    #[error("Failed to access timestamp map '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid timestamp map.
    #[error("Invalid timestamp map '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
