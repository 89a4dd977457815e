//! Orchestrates a ChiliProject to GitLab migration run.
//!
//! A run validates everything it can before touching GitLab: the export is
//! read, authors are checked for tokens, the name directory is fetched and
//! every project and assignee is resolved. Only then are issues created, one
//! at a time and in export order, so GitLab's issue numbering follows the
//! ChiliProject order. The first failing call stops the run.

mod config;
mod error;

pub use config::{BatchMode, RunnerConfig};
pub use error::RunnerError;

use crate::config::MigrationSettings;
use crate::directory::NameDirectory;
use crate::gitlab::{GitLabApi, ReqwestGitLab};
use crate::issues::{migrate_issue, prepare_issue};
use crate::reconcile::{
    reconcile_projects, source_project_names, validate_assignees, validate_authors,
    ProjectMapping,
};
use crate::source::{load_source_issues, SourceIssue};
use crate::summary::RunSummary;
use crate::timestamps::TimestampMap;
use tracing::{info, warn};

/// Runs a migration against a GitLab instance.
pub struct Runner {
    config: RunnerConfig,
    settings: MigrationSettings,
    api: Box<dyn GitLabApi>,
}

impl Runner {
    /// Builds a runner, loading settings from the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the settings are invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let settings = MigrationSettings::load(config.settings_path())?;
        let api = ReqwestGitLab::new(settings.api_url.clone())?;
        Ok(Self::with_api(config, settings, Box::new(api)))
    }

    /// Builds a runner around an existing API implementation.
    pub fn with_api(
        config: RunnerConfig,
        settings: MigrationSettings,
        api: Box<dyn GitLabApi>,
    ) -> Self {
        Self {
            config,
            settings,
            api,
        }
    }

    /// Executes the full migration flow.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on the first configuration, directory or GitLab
    /// failure. Issues created before a failure stay in GitLab and are not
    /// written to the timestamp map.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());

        let issues = load_source_issues(self.config.input_path(), self.config.encoding())?;
        summary.issues_read = issues.len();

        if issues.is_empty() {
            warn!("Export contains no issues");
            if !self.config.dry_run() {
                TimestampMap::new().save(self.config.output_path())?;
            }
            return Ok(summary);
        }

        validate_authors(&issues, &self.settings)?;

        let directory = NameDirectory::fetch(
            self.api.as_ref(),
            self.settings.read_token(),
            self.settings.page_size,
        )
        .await?;

        let projects = reconcile_projects(
            &source_project_names(&issues),
            &directory,
            &self.settings.manual_mapping,
        )?;
        summary.projects_mapped = projects.len();

        validate_assignees(&issues, &directory)?;

        let selected = self.config.batch().select(&issues);
        summary.issues_selected = selected.len();
        if selected.len() < issues.len() {
            warn!(
                batch = %self.config.batch(),
                selected = selected.len(),
                total = issues.len(),
                "Migrating only part of the export"
            );
        }

        if self.config.dry_run() {
            print_dry_run_preview(selected, &self.settings, &directory, &projects)?;
            return Ok(summary);
        }

        let mut timestamps = TimestampMap::new();
        for (index, issue) in selected.iter().enumerate() {
            info!(
                position = index + 1,
                total = selected.len(),
                subject = %issue.subject,
                author = %issue.author_key(),
                "Migrating issue"
            );

            let migrated = migrate_issue(
                self.api.as_ref(),
                issue,
                &self.settings,
                &directory,
                &projects,
            )
            .await?;
            info!(
                source_number = %migrated.source_number,
                issue_id = migrated.created.id,
                closed = migrated.closed,
                "Issue migrated"
            );

            timestamps.record(migrated.created.id, &issue.created, &issue.updated);
            summary.record_issue(&migrated);
        }

        timestamps.save(self.config.output_path())?;
        Ok(summary)
    }
}

fn print_dry_run_preview(
    issues: &[SourceIssue],
    settings: &MigrationSettings,
    directory: &NameDirectory,
    projects: &ProjectMapping,
) -> Result<(), RunnerError> {
    println!("\n[DRY RUN] {} issues would be created:\n", issues.len());

    for (i, issue) in issues.iter().enumerate() {
        let (project_id, payload) = prepare_issue(issue, settings, directory, projects)?;

        println!("  [{}/{}] #{} {}", i + 1, issues.len(), issue.number, payload.title);
        println!(
            "    Project: {} -> GitLab project {project_id}",
            issue.project
        );
        println!("    Author: {}", issue.author_key());
        println!("    Labels: {}", payload.labels);
        if let Some(assignee_id) = payload.assignee_id {
            println!("    Assignee: {} (user {assignee_id})", issue.assignee);
        }
        if issue.status == settings.closed_status {
            println!("    Would close after creation");
        }
    }

    if let Some(first) = issues.first() {
        let (_, payload) = prepare_issue(first, settings, directory, projects)?;
        println!("\n  Sample description:");
        for line in payload.description.lines().take(10) {
            println!("    {line}");
        }
        if payload.description.lines().count() > 10 {
            println!("    ...");
        }
    }

    println!();
    Ok(())
}
