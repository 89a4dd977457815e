//! Runner error types.

/// Errors that can stop a migration run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Export reading errors.
    #[error(transparent)]
    Source(#[from] crate::source::SourceError),

    /// GitLab client initialization errors.
    #[error(transparent)]
    GitLab(#[from] crate::gitlab::ApiError),

    /// Name directory errors.
    #[error(transparent)]
    Directory(#[from] crate::directory::DirectoryError),

    /// Name reconciliation errors.
    #[error(transparent)]
    Reconcile(#[from] crate::reconcile::ReconcileError),

    /// Issue migration errors.
    #[error(transparent)]
    Issue(#[from] crate::issues::IssueError),

    /// Timestamp map errors.
    #[error(transparent)]
    Timestamps(#[from] crate::timestamps::TimestampError),
}
