//! Snapshot of GitLab project and user names.
//!
//! The directory is fetched once, before anything is created, and is never
//! refreshed. Names are keyed lowercase so ChiliProject and GitLab names can
//! be matched case-insensitively.

mod error;

pub use error::DirectoryError;

use crate::gitlab::{Catalog, CatalogEntry, GitLabApi};
use std::collections::HashMap;
use tracing::{debug, info, info_span, Instrument};

/// Upper bound on pages fetched per listing.
///
/// Reaching it with pages still full is reported as a truncated listing rather
/// than continuing with part of the catalog.
pub const MAX_PAGES: u32 = 1000;

/// Lowercase name to id maps for GitLab projects and users.
#[derive(Debug, Clone, Default)]
pub struct NameDirectory {
    projects: HashMap<String, u64>,
    users: HashMap<String, u64>,
}

impl NameDirectory {
    /// Builds a directory from listing entries.
    ///
    /// If two entries share a name (ignoring case), the later one wins.
    pub fn from_entries(
        projects: impl IntoIterator<Item = CatalogEntry>,
        users: impl IntoIterator<Item = CatalogEntry>,
    ) -> Self {
        Self {
            projects: index_by_name(Catalog::Projects, projects),
            users: index_by_name(Catalog::Users, users),
        }
    }

    /// Fetches every project and user visible to `token`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if a listing call fails or a listing cannot be
    /// fetched completely.
    pub async fn fetch(
        api: &dyn GitLabApi,
        token: &str,
        page_size: u32,
    ) -> Result<Self, DirectoryError> {
        let projects = fetch_catalog(api, token, Catalog::Projects, page_size).await?;
        let users = fetch_catalog(api, token, Catalog::Users, page_size).await?;

        let directory = Self::from_entries(projects, users);
        info!(
            projects = directory.project_count(),
            users = directory.user_count(),
            "Name directory ready"
        );
        Ok(directory)
    }

    /// Returns the id of a project by lowercase name.
    #[must_use]
    pub fn project_id(&self, name: &str) -> Option<u64> {
        self.projects.get(name).copied()
    }

    /// Returns the id of a user by lowercase name.
    #[must_use]
    pub fn user_id(&self, name: &str) -> Option<u64> {
        self.users.get(name).copied()
    }

    /// Returns true if a project with this lowercase name exists.
    #[must_use]
    pub fn has_project(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }

    /// Number of distinct project names.
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Number of distinct user names.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

/// Fetches all pages of a listing.
async fn fetch_catalog(
    api: &dyn GitLabApi,
    token: &str,
    catalog: Catalog,
    page_size: u32,
) -> Result<Vec<CatalogEntry>, DirectoryError> {
    let span = info_span!("fetch_catalog", %catalog);

    async {
        let mut entries = Vec::new();

        for page in 1..=MAX_PAGES {
            let batch = api.list_catalog(token, catalog, page, page_size).await?;
            let full = batch.len() >= page_size as usize;
            debug!(page, count = batch.len(), "Fetched page");
            entries.extend(batch);

            if !full {
                info!(count = entries.len(), "Listing complete");
                return Ok(entries);
            }
        }

        Err(DirectoryError::Truncated {
            catalog,
            pages: MAX_PAGES,
            fetched: entries.len(),
        })
    }
    .instrument(span)
    .await
}

/// Indexes entries by lowercase name, later entries replacing earlier ones.
fn index_by_name(
    catalog: Catalog,
    entries: impl IntoIterator<Item = CatalogEntry>,
) -> HashMap<String, u64> {
    let mut index = HashMap::new();
    for entry in entries {
        let name = entry.name.to_lowercase();
        if let Some(previous) = index.insert(name.clone(), entry.id) {
            debug!(
                %catalog,
                name = %name,
                previous,
                id = entry.id,
                "Duplicate name, keeping later entry"
            );
        }
    }
    index
}
