//! Runner configuration.

use crate::source::{SourceEncoding, SourceIssue};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which part of the export a run migrates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchMode {
    /// Every issue in the export.
    #[default]
    All,
    /// Only the first issue, for a trial run against a real GitLab.
    FirstOnly,
}

impl BatchMode {
    /// Selects the issues to migrate.
    #[must_use]
    pub fn select(self, issues: &[SourceIssue]) -> &[SourceIssue] {
        match self {
            Self::All => issues,
            Self::FirstOnly => &issues[..issues.len().min(1)],
        }
    }
}

impl FromStr for BatchMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "first-only" | "first" => Ok(Self::FirstOnly),
            other => Err(format!(
                "unknown batch mode '{other}' (expected 'all' or 'first-only')"
            )),
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::FirstOnly => "first-only",
        })
    }
}

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the ChiliProject CSV export.
    input_path: PathBuf,
    /// Path to `migration.toml`.
    settings_path: PathBuf,
    /// Where the timestamp map is written.
    output_path: PathBuf,
    /// Character encoding of the export.
    encoding: SourceEncoding,
    /// Whether to preview payloads without creating issues.
    dry_run: bool,
    /// Which issues to migrate.
    batch: BatchMode,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(input_path: PathBuf, settings_path: PathBuf, dry_run: bool) -> Self {
        Self {
            input_path,
            settings_path,
            output_path: PathBuf::from("new_issue_timestamps.json"),
            encoding: SourceEncoding::default(),
            dry_run,
            batch: BatchMode::default(),
        }
    }

    /// Sets a custom timestamp map path.
    pub fn with_output_path(mut self, output_path: PathBuf) -> Self {
        self.output_path = output_path;
        self
    }

    /// Sets the export encoding.
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the batch mode.
    pub fn with_batch(mut self, batch: BatchMode) -> Self {
        self.batch = batch;
        self
    }

    /// Returns the export path.
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Returns the settings file path.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Returns the timestamp map path.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Returns the export encoding.
    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the batch mode.
    pub fn batch(&self) -> BatchMode {
        self.batch
    }
}
