//! Run summary types.

use crate::issues::MigratedIssue;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of issues read from the export.
    pub issues_read: usize,

    /// Number of distinct source projects mapped to GitLab.
    pub projects_mapped: usize,

    /// Number of issues selected by the batch mode.
    pub issues_selected: usize,

    /// Number of issues created in GitLab.
    pub issues_created: usize,

    /// Number of created issues that were closed afterwards.
    pub issues_closed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a migrated issue.
    pub fn record_issue(&mut self, issue: &MigratedIssue) {
        self.issues_created += 1;
        if issue.closed {
            self.issues_closed += 1;
        }
    }

    /// Returns true if every selected issue was created.
    #[must_use]
    pub fn all_created(&self) -> bool {
        self.issues_created == self.issues_selected
    }
}
