//! Issue migration error types.

use crate::gitlab::ApiError;
use thiserror::Error;

/// Errors that can occur while migrating a single issue.
#[derive(Debug, Error)]
pub enum IssueError {
    /// GitLab API error.
    #[error("GitLab API error: {0}")]
    GitLabError(#[from] ApiError),

    /// The issue's project is missing from the project mapping.
    #[error("No GitLab project mapped for '{project}'")]
    UnmappedProject { project: String },

    /// The assignee is not a GitLab user.
    #[error("Assignee '{assignee}' not found in GitLab")]
    UnknownAssignee { assignee: String },

    /// The author has no private token.
    #[error("Author '{author}' has no private token")]
    MissingToken { author: String },
}
