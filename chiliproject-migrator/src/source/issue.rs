//! A single row of the ChiliProject issue export.

use serde::Deserialize;

/// One issue as exported by ChiliProject.
///
/// All values are kept exactly as exported; dates in particular are opaque
/// strings in whatever format the export used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceIssue {
    /// ChiliProject issue number.
    #[serde(rename = "#")]
    pub number: String,

    /// Project name.
    #[serde(rename = "Project")]
    pub project: String,

    /// Author display name.
    #[serde(rename = "Author")]
    pub author: String,

    /// Issue subject, used as the GitLab title.
    #[serde(rename = "Subject")]
    pub subject: String,

    /// Issue description.
    #[serde(rename = "Description")]
    pub description: String,

    /// Priority name (e.g. "Normal").
    #[serde(rename = "Priority")]
    pub priority: String,

    /// Tracker name (e.g. "Bug", "Feature").
    #[serde(rename = "Tracker")]
    pub tracker: String,

    /// Category, often empty.
    #[serde(rename = "Category")]
    pub category: String,

    /// Status name (e.g. "New", "Closed").
    #[serde(rename = "Status")]
    pub status: String,

    /// Assignee display name, empty when unassigned.
    #[serde(rename = "Assignee")]
    pub assignee: String,

    /// Creation timestamp.
    #[serde(rename = "Created")]
    pub created: String,

    /// Last update timestamp.
    #[serde(rename = "Updated")]
    pub updated: String,

    /// Due date.
    #[serde(rename = "Due date")]
    pub due_date: String,

    /// Completion percentage.
    #[serde(rename = "% Done")]
    pub percent_done: String,
}

impl SourceIssue {
    /// Lowercase project name, the key used for reconciliation.
    #[must_use]
    pub fn project_key(&self) -> String {
        self.project.to_lowercase()
    }

    /// Lowercase author name, the key used for token lookup.
    #[must_use]
    pub fn author_key(&self) -> String {
        self.author.to_lowercase()
    }

    /// Lowercase assignee name, or `None` when unassigned.
    #[must_use]
    pub fn assignee_key(&self) -> Option<String> {
        (!self.assignee.is_empty()).then(|| self.assignee.to_lowercase())
    }

    /// Fields appended to the migrated description, in display order.
    #[must_use]
    pub fn history_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("#", self.number.as_str()),
            ("Created", self.created.as_str()),
            ("Updated", self.updated.as_str()),
            ("Due date", self.due_date.as_str()),
            ("% Done", self.percent_done.as_str()),
        ]
    }
}
