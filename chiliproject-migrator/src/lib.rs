#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod backfill;
pub mod config;
pub mod directory;
pub mod gitlab;
pub mod issues;
pub mod reconcile;
pub mod runner;
pub mod source;
pub mod summary;
pub mod timestamps;

pub use backfill::{emit_backfill, BackfillError, StatementKind, StatementRenderer, DEFAULT_DATABASE};
pub use config::{ConfigError, MigrationSettings};
pub use directory::{DirectoryError, NameDirectory};
pub use gitlab::{ApiError, Catalog, CatalogEntry, CreatedIssue, GitLabApi, NewIssue, ReqwestGitLab};
pub use issues::{
    build_description, build_issue, build_labels, migrate_issue, prepare_issue, IssueError,
    MigratedIssue,
};
pub use reconcile::{
    reconcile_projects, source_project_names, validate_assignees, validate_authors,
    ProjectMapping, ReconcileError,
};
pub use runner::{BatchMode, Runner, RunnerConfig, RunnerError};
pub use source::{load_source_issues, parse_source_issues, SourceEncoding, SourceError, SourceIssue};
pub use summary::RunSummary;
pub use timestamps::{IssueTimestamps, TimestampError, TimestampMap};
