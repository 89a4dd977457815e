//! Reconciliation error types.

use thiserror::Error;

/// Configuration problems found while matching ChiliProject names to GitLab.
///
/// All of these are detected before any issue is created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// Source projects with neither a GitLab project of the same name nor a manual mapping.
    #[error("No known mapping for ChiliProject project names: {}", names.join(", "))]
    UnmappedProjects { names: Vec<String> },

    /// Manual mappings pointing at GitLab projects that do not exist.
    #[error("Manual mapping targets not found in GitLab: {}", mappings.join(", "))]
    UnknownMappingTargets { mappings: Vec<String> },

    /// An issue author has no private token configured.
    #[error("Author \"{author}\" has no entry in [tokens]")]
    MissingAuthorToken { author: String },

    /// Assignees that do not exist as GitLab users.
    #[error("Assignees not found in GitLab: {}", names.join(", "))]
    UnknownAssignees { names: Vec<String> },
}
