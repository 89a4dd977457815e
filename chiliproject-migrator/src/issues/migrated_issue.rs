//! Migrated issue information.

use crate::gitlab::CreatedIssue;

/// A ChiliProject issue re-created in GitLab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedIssue {
    /// ChiliProject issue number.
    pub source_number: String,

    /// GitLab project the issue was created in.
    pub project_id: u64,

    /// Issue as returned by GitLab.
    pub created: CreatedIssue,

    /// Whether the issue was closed after creation.
    pub closed: bool,
}
