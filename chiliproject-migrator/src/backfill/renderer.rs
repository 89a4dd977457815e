//! Statement renderer.

use super::{BackfillError, StatementKind};
use crate::timestamps::TimestampMap;
use handlebars::{no_escape, Handlebars};
use serde_json::json;

/// Creates a Handlebars registry holding every statement template.
///
/// The registry is configured with:
/// - No HTML escaping (statements are plain SQL)
/// - Strict mode (catches missing variables)
///
/// # Errors
///
/// Returns an error if a template fails to compile.
pub fn create_statement_registry() -> Result<Handlebars<'static>, BackfillError> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);

    for kind in StatementKind::ALL {
        hbs.register_template_string(kind.name(), kind.template())?;
    }

    Ok(hbs)
}

/// Renders timestamp backfill statements for one database.
pub struct StatementRenderer {
    handlebars: Handlebars<'static>,
    database: String,
}

impl StatementRenderer {
    /// Creates a renderer targeting the given database (schema) name.
    ///
    /// # Errors
    ///
    /// Returns [`BackfillError::InvalidDatabase`] if the name is empty or
    /// contains a backtick.
    pub fn new(database: &str) -> Result<Self, BackfillError> {
        if database.trim().is_empty() || database.contains('`') {
            return Err(BackfillError::InvalidDatabase(database.to_string()));
        }

        Ok(Self {
            handlebars: create_statement_registry()?,
            database: database.to_string(),
        })
    }

    /// Renders a single statement.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_statement(
        &self,
        kind: StatementKind,
        issue_id: u64,
        created: &str,
        updated: &str,
    ) -> Result<String, BackfillError> {
        let data = json!({
            "database": self.database,
            "id": issue_id,
            "created": created,
            "updated": updated
        });

        Ok(self.handlebars.render(kind.name(), &data)?)
    }

    /// Renders every statement for every record, grouped by kind.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_all(&self, map: &TimestampMap) -> Result<Vec<String>, BackfillError> {
        let mut statements = Vec::with_capacity(map.len() * StatementKind::ALL.len());
        for kind in StatementKind::ALL {
            for (issue_id, timestamps) in map.iter() {
                statements.push(self.render_statement(
                    kind,
                    issue_id,
                    &timestamps.created,
                    &timestamps.updated,
                )?);
            }
        }
        Ok(statements)
    }
}
