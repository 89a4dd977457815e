//! Source export error types.

use thiserror::Error;

/// Errors that can occur while reading the ChiliProject export.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read the export file.
    #[error("Failed to read export '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The export is not valid UTF-8 while UTF-8 was requested.
    #[error("Export '{path}' is not valid UTF-8: {source}")]
    EncodingError {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A row could not be parsed into an issue.
    #[error("Malformed CSV in '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}
