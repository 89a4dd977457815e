//! Errors raised while reading the migration settings.

use thiserror::Error;

/// Why `migration.toml` could not be turned into [`MigrationSettings`](super::MigrationSettings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("Cannot read settings file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings are not valid TOML or do not match the expected keys.
    #[error("Malformed settings in '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range, empty, or has no matching token.
    #[error("Invalid settings in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// No settings file at the given path.
    #[error("Settings file not found: {path}")]
    MissingFile { path: String },
}
