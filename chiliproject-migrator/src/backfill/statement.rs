//! Kinds of backfill statements.

/// A kind of `UPDATE` statement emitted per migrated issue.
///
/// Statements are emitted grouped by kind, in the order of [`StatementKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `issues.created_at` / `issues.updated_at`.
    Issues,
    /// The "_Status changed to closed_" system note.
    ClosingNotes,
    /// The "opened" activity event.
    CreateEvents,
    /// The "closed" activity event.
    CloseEvents,
    /// Label assignments.
    Taggings,
}

impl StatementKind {
    /// Every kind, in emission order.
    pub const ALL: [StatementKind; 5] = [
        Self::Issues,
        Self::ClosingNotes,
        Self::CreateEvents,
        Self::CloseEvents,
        Self::Taggings,
    ];

    /// Template registry name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::ClosingNotes => "closing_notes",
            Self::CreateEvents => "create_events",
            Self::CloseEvents => "close_events",
            Self::Taggings => "taggings",
        }
    }

    /// Handlebars source of the statement.
    #[must_use]
    pub fn template(self) -> &'static str {
        match self {
            Self::Issues => concat!(
                "UPDATE `{{database}}`.`issues` ",
                "SET `created_at` = '{{created}}', `updated_at` = '{{updated}}' ",
                "WHERE `issues`.`id` = {{id}};"
            ),
            Self::ClosingNotes => concat!(
                "UPDATE `{{database}}`.`notes` ",
                "SET `created_at` = '{{updated}}', `updated_at` = '{{updated}}' ",
                "WHERE `noteable_id` = {{id}} ",
                "AND `note` = '_Status changed to closed_' ",
                "AND `noteable_type` = 'Issue';"
            ),
            Self::CreateEvents => concat!(
                "UPDATE `{{database}}`.`events` ",
                "SET `created_at` = '{{created}}', `updated_at` = '{{created}}' ",
                "WHERE `events`.`target_id` = {{id}} ",
                "AND `target_type` = 'Issue' ",
                "AND `action` = 1;"
            ),
            Self::CloseEvents => concat!(
                "UPDATE `{{database}}`.`events` ",
                "SET `created_at` = '{{updated}}', `updated_at` = '{{updated}}' ",
                "WHERE `events`.`target_id` = {{id}} ",
                "AND `target_type` = 'Issue' ",
                "AND `action` = 3;"
            ),
            Self::Taggings => concat!(
                "UPDATE `{{database}}`.`taggings` ",
                "SET `created_at` = '{{created}}' ",
                "WHERE `taggable_id` = {{id}} ",
                "AND `taggable_type` = 'Issue';"
            ),
        }
    }
}
