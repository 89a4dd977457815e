//! Backfill rendering error types.

/// Errors that can occur while rendering backfill statements.
#[derive(Debug, thiserror::Error)]
pub enum BackfillError {
    /// Handlebars rendering error.
    #[error("Statement rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Template registration error.
    #[error("Statement template registration error: {0}")]
    RegistrationError(#[from] handlebars::TemplateError),

    /// The database name cannot be used as a quoted identifier.
    #[error("Invalid database name '{0}'")]
    InvalidDatabase(String),

    /// Writing the statements failed.
    #[error("Failed to write statements: {0}")]
    IoError(#[from] std::io::Error),
}
