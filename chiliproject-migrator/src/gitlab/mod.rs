//! GitLab API access.
//!
//! [`GitLabApi`] is the seam between the migration logic and the network. The
//! production implementation is [`ReqwestGitLab`]; tests substitute an
//! in-memory fake.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use client::ReqwestGitLab;
pub use error::ApiError;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A GitLab listing that the name directory is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    /// `GET /projects`
    Projects,
    /// `GET /users`
    Users,
}

impl Catalog {
    /// API path of the listing.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A project or user as returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// Numeric GitLab id.
    pub id: u64,
    /// Display name.
    pub name: String,
}

/// Payload of `POST /projects/:id/issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    /// Issue title.
    pub title: String,

    /// Markdown description.
    pub description: String,

    /// Comma separated label names.
    pub labels: String,

    /// Assignee user id; left out of the request entirely when unassigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
}

/// The issue returned by GitLab after creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    /// Global issue id, the primary key of the `issues` table.
    pub id: u64,

    /// Project-scoped issue number.
    #[serde(default)]
    pub iid: Option<u64>,
}

impl CreatedIssue {
    /// Identifier used in per-project issue URLs.
    #[must_use]
    pub fn url_id(&self) -> u64 {
        self.iid.unwrap_or(self.id)
    }
}

/// Operations the migration needs from GitLab.
///
/// Every call carries the private token to act with, so issues can be created
/// on behalf of their original authors.
#[async_trait]
pub trait GitLabApi: Send + Sync {
    /// Fetches one page of a listing (pages start at 1).
    async fn list_catalog(
        &self,
        token: &str,
        catalog: Catalog,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CatalogEntry>, ApiError>;

    /// Creates an issue in a project.
    async fn create_issue(
        &self,
        token: &str,
        project_id: u64,
        issue: &NewIssue,
    ) -> Result<CreatedIssue, ApiError>;

    /// Closes a previously created issue.
    async fn close_issue(
        &self,
        token: &str,
        project_id: u64,
        issue: &CreatedIssue,
    ) -> Result<(), ApiError>;
}
