//! Re-creating ChiliProject issues in GitLab.
//!
//! Each issue is created with its author's private token so GitLab attributes
//! it to the original author, then closed with the same token if it was
//! closed in ChiliProject.

mod error;
mod migrated_issue;
mod payload;

pub use error::IssueError;
pub use migrated_issue::MigratedIssue;
pub use payload::{build_description, build_issue, build_labels};

use crate::config::MigrationSettings;
use crate::directory::NameDirectory;
use crate::gitlab::{GitLabApi, NewIssue};
use crate::reconcile::ProjectMapping;
use crate::source::SourceIssue;
use tracing::{info, info_span, Instrument};

/// Resolves the target project and builds the creation payload without
/// calling GitLab.
///
/// # Errors
///
/// Returns [`IssueError`] if the project is unmapped or the assignee unknown.
pub fn prepare_issue(
    issue: &SourceIssue,
    settings: &MigrationSettings,
    directory: &NameDirectory,
    projects: &ProjectMapping,
) -> Result<(u64, NewIssue), IssueError> {
    let project = issue.project_key();
    let project_id = projects
        .project_id(&project)
        .ok_or(IssueError::UnmappedProject { project })?;
    let payload = build_issue(issue, directory, &settings.migration_label)?;
    Ok((project_id, payload))
}

/// Creates one issue in GitLab and closes it if the source issue was closed.
///
/// # Errors
///
/// Returns [`IssueError`] if the issue cannot be prepared or any GitLab call
/// answers with an unexpected status.
pub async fn migrate_issue(
    api: &dyn GitLabApi,
    issue: &SourceIssue,
    settings: &MigrationSettings,
    directory: &NameDirectory,
    projects: &ProjectMapping,
) -> Result<MigratedIssue, IssueError> {
    let span = info_span!(
        "migrate_issue",
        number = %issue.number,
        author = %issue.author_key()
    );

    async {
        let token = settings
            .token_for(&issue.author)
            .ok_or_else(|| IssueError::MissingToken {
                author: issue.author_key(),
            })?;
        let (project_id, payload) = prepare_issue(issue, settings, directory, projects)?;

        info!(title = %payload.title, project_id, "Adding issue");
        let created = api.create_issue(token, project_id, &payload).await?;
        info!(issue_id = created.id, "Issue created");

        let closed = issue.status == settings.closed_status;
        if closed {
            info!(issue_id = created.id, "Closing issue");
            api.close_issue(token, project_id, &created).await?;
        }

        Ok(MigratedIssue {
            source_number: issue.number.clone(),
            project_id,
            created,
            closed,
        })
    }
    .instrument(span)
    .await
}
