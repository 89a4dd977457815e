//! SQL statements that restore the original ChiliProject timestamps.
//!
//! The GitLab API does not accept creation or update times, so migrated
//! issues, their closing notes, activity events and label taggings all carry
//! the time of the migration. The statements rendered here overwrite those
//! columns directly in the GitLab database. They are meant to be reviewed and
//! executed by hand; values are substituted verbatim.

mod error;
mod renderer;
mod statement;

pub use error::BackfillError;
pub use renderer::{create_statement_registry, StatementRenderer};
pub use statement::StatementKind;

use crate::timestamps::TimestampMap;
use std::io::Write;
use tracing::info;

/// Database name used when none is given.
pub const DEFAULT_DATABASE: &str = "gitlab";

/// Writes every backfill statement for `map`, one per line.
///
/// Returns the number of statements written.
///
/// # Errors
///
/// Returns [`BackfillError`] if rendering or writing fails.
pub fn emit_backfill(
    map: &TimestampMap,
    database: &str,
    out: &mut impl Write,
) -> Result<usize, BackfillError> {
    let renderer = StatementRenderer::new(database)?;
    let statements = renderer.render_all(map)?;

    for statement in &statements {
        writeln!(out, "{statement}")?;
    }

    info!(
        issues = map.len(),
        statements = statements.len(),
        "Emitted backfill statements"
    );
    Ok(statements.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_statement() {
        let mut map = TimestampMap::new();
        map.record(5, "a", "b");
        let mut out = Vec::new();

        let count = emit_backfill(&map, DEFAULT_DATABASE, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(count, StatementKind::ALL.len());
        assert_eq!(text.lines().count(), count);
        assert!(text.lines().all(|line| line.starts_with("UPDATE `gitlab`.")));
    }

    #[test]
    fn empty_map_writes_nothing() {
        let mut out = Vec::new();

        let count = emit_backfill(&TimestampMap::new(), DEFAULT_DATABASE, &mut out).unwrap();

        assert_eq!(count, 0);
        assert!(out.is_empty());
    }
}
