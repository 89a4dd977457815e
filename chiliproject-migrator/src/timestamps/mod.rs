//! Original timestamps of migrated issues.
//!
//! GitLab stamps created issues with the time of the migration. The map
//! written here keeps the ChiliProject timestamps, keyed by GitLab issue id,
//! so the backfill step can restore them.

mod error;

pub use error::TimestampError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Creation and update time of one issue, in the export's format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTimestamps {
    /// Original creation time.
    pub created: String,
    /// Original last update time.
    pub updated: String,
}

/// GitLab issue id to original timestamps.
///
/// Serialized as a JSON object with the ids as keys, in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMap {
    entries: BTreeMap<u64, IssueTimestamps>,
}

impl TimestampMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the timestamps of a created issue.
    pub fn record(&mut self, issue_id: u64, created: &str, updated: &str) {
        self.entries.insert(
            issue_id,
            IssueTimestamps {
                created: created.to_string(),
                updated: updated.to_string(),
            },
        );
    }

    /// Iterates records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &IssueTimestamps)> {
        self.entries.iter().map(|(id, timestamps)| (*id, timestamps))
    }

    /// Returns the timestamps of an issue.
    #[must_use]
    pub fn get(&self, issue_id: u64) -> Option<&IssueTimestamps> {
        self.entries.get(&issue_id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the map as pretty-printed JSON with four space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), TimestampError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| TimestampError::JsonError {
                path: path.display().to_string(),
                source: e,
            })?;
        buffer.push(b'\n');

        std::fs::write(path, buffer).map_err(|e| TimestampError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        info!(path = %path.display(), count = self.len(), "Wrote timestamp map");
        Ok(())
    }

    /// Reads a map previously written by [`TimestampMap::save`].
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, TimestampError> {
        let content = std::fs::read_to_string(path).map_err(|e| TimestampError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| TimestampError::JsonError {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_ids_as_sorted_string_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("new_issue_timestamps.json");
        let mut map = TimestampMap::new();
        map.record(10, "2013-01-02", "2013-01-03");
        map.record(9, "2013-01-01", "2013-01-01");

        map.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            r#"{
    "9": {
        "created": "2013-01-01",
        "updated": "2013-01-01"
    },
    "10": {
        "created": "2013-01-02",
        "updated": "2013-01-03"
    }
}
"#
        );
    }

    #[test]
    fn loads_saved_map() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("map.json");
        let mut map = TimestampMap::new();
        map.record(1001, "2013-11-19 12:25", "2013-11-20 08:00");
        map.save(&path).unwrap();

        let loaded = TimestampMap::load(&path).unwrap();

        assert_eq!(loaded, map);
        assert_eq!(loaded.get(1001).unwrap().updated, "2013-11-20 08:00");
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("map.json");
        fs::write(&path, r#"{"abc": {"created": "x", "updated": "y"}}"#).unwrap();

        let result = TimestampMap::load(&path);
        assert!(matches!(result, Err(TimestampError::JsonError { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = TempDir::new().unwrap();

        let result = TimestampMap::load(&temp.path().join("absent.json"));
        assert!(matches!(result, Err(TimestampError::IoError { .. })));
    }
}
