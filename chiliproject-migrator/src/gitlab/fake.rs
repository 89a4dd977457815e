//! In-memory [`GitLabApi`] used by unit tests.

use super::{ApiError, Catalog, CatalogEntry, CreatedIssue, GitLabApi, NewIssue};
use async_trait::async_trait;
use std::sync::Mutex;

/// A recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List {
        catalog: Catalog,
        page: u32,
    },
    Create {
        token: String,
        project_id: u64,
        issue: NewIssue,
    },
    Close {
        token: String,
        project_id: u64,
        issue_id: u64,
    },
}

/// Serves fixed listings and hands out sequential issue ids starting at 1000.
#[derive(Debug, Default)]
pub(crate) struct FakeGitLab {
    pub(crate) projects: Vec<CatalogEntry>,
    pub(crate) users: Vec<CatalogEntry>,
    /// Create call (0-based) that answers with HTTP 500.
    pub(crate) fail_create_at: Option<usize>,
    /// Close call (0-based) that answers with HTTP 404.
    pub(crate) fail_close_at: Option<usize>,
    calls: Mutex<Vec<Call>>,
}

pub(crate) fn entry(id: u64, name: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
    }
}

impl FakeGitLab {
    pub(crate) fn new(projects: Vec<CatalogEntry>, users: Vec<CatalogEntry>) -> Self {
        Self {
            projects,
            users,
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn mutating_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::List { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GitLabApi for FakeGitLab {
    async fn list_catalog(
        &self,
        _token: &str,
        catalog: Catalog,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CatalogEntry>, ApiError> {
        self.record(Call::List { catalog, page });
        let entries = match catalog {
            Catalog::Projects => &self.projects,
            Catalog::Users => &self.users,
        };
        let start = ((page - 1) * per_page) as usize;
        Ok(entries
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn create_issue(
        &self,
        token: &str,
        project_id: u64,
        issue: &NewIssue,
    ) -> Result<CreatedIssue, ApiError> {
        let created_so_far = self
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::Create { .. }))
            .count();
        self.record(Call::Create {
            token: token.to_string(),
            project_id,
            issue: issue.clone(),
        });
        if self.fail_create_at == Some(created_so_far) {
            return Err(ApiError::UnexpectedStatus {
                operation: "create issue".to_string(),
                status: 500,
                body: "boom".to_string(),
            });
        }
        let id = 1000 + created_so_far as u64;
        Ok(CreatedIssue {
            id,
            iid: Some(created_so_far as u64 + 1),
        })
    }

    async fn close_issue(
        &self,
        token: &str,
        project_id: u64,
        issue: &CreatedIssue,
    ) -> Result<(), ApiError> {
        let closed_so_far = self
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::Close { .. }))
            .count();
        self.record(Call::Close {
            token: token.to_string(),
            project_id,
            issue_id: issue.url_id(),
        });
        if self.fail_close_at == Some(closed_so_far) {
            return Err(ApiError::UnexpectedStatus {
                operation: "close issue".to_string(),
                status: 404,
                body: "404 Not found".to_string(),
            });
        }
        Ok(())
    }
}
