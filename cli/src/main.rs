//! CLI for the ChiliProject to GitLab migrator.
//!
//! `migrate` re-creates the issues of a ChiliProject CSV export in GitLab,
//! `backfill-sql` prints the SQL that restores their original timestamps.

use chiliproject_migrator::{
    emit_backfill, BatchMode, RunSummary, Runner, RunnerConfig, RunnerError, SourceEncoding,
    TimestampMap, DEFAULT_DATABASE,
};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ChiliProject to GitLab migrator - Move exported issues into GitLab.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the exported issues in GitLab.
    Migrate {
        /// Path to the ChiliProject CSV export.
        #[arg(long, default_value = "export.csv")]
        input: PathBuf,

        /// Path to the settings file.
        #[arg(long, env = "CHILI2GITLAB_SETTINGS", default_value = "migration.toml")]
        settings: PathBuf,

        /// Where to write the issue timestamp map.
        #[arg(long, default_value = "new_issue_timestamps.json")]
        output: PathBuf,

        /// Character encoding of the export.
        #[arg(long, default_value_t = SourceEncoding::Latin1)]
        encoding: SourceEncoding,

        /// Which issues to migrate: `all` or `first-only`.
        #[arg(long, default_value_t = BatchMode::All)]
        batch: BatchMode,

        /// Preview issues without creating them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print SQL statements restoring the original issue timestamps.
    BackfillSql {
        /// Timestamp map written by `migrate`.
        #[arg(long, default_value = "new_issue_timestamps.json")]
        timestamps: PathBuf,

        /// Name of the GitLab database.
        #[arg(long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    let result: Result<(), Box<dyn Error>> = match args.command {
        Command::Migrate {
            input,
            settings,
            output,
            encoding,
            batch,
            dry_run,
        } => {
            let config = RunnerConfig::new(input, settings, dry_run)
                .with_output_path(output)
                .with_encoding(encoding)
                .with_batch(batch);
            migrate(config)
                .await
                .map(|summary| print_summary(&summary))
                .map_err(Into::into)
        }
        Command::BackfillSql {
            timestamps,
            database,
        } => backfill(&timestamps, &database),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr so that `backfill-sql` output on stdout stays clean.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Runs the migration.
async fn migrate(config: RunnerConfig) -> Result<RunSummary, RunnerError> {
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints backfill statements for a timestamp map to stdout.
fn backfill(timestamps: &Path, database: &str) -> Result<(), Box<dyn Error>> {
    let map = TimestampMap::load(timestamps)?;
    let mut stdout = std::io::stdout().lock();
    emit_backfill(&map, database, &mut stdout)?;
    Ok(())
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues in export: {}", summary.issues_read);
    println!("  Projects mapped: {}", summary.projects_mapped);
    println!("  Issues selected: {}", summary.issues_selected);

    if !summary.dry_run {
        println!("  Issues created: {}", summary.issues_created);
        println!("  Issues closed: {}", summary.issues_closed);
    }
}
