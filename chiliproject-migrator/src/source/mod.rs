//! ChiliProject CSV export reading.
//!
//! ChiliProject writes its issue export as ISO-8859-1 encoded, comma separated
//! text with double-quoted fields. Rows are returned in file order, which is
//! also the order issues are created in GitLab.

mod error;
mod issue;

pub use error::SourceError;
pub use issue::SourceIssue;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Character encoding of the export file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceEncoding {
    /// ISO-8859-1, what ChiliProject produces.
    #[default]
    Latin1,
    /// UTF-8, for exports that were re-encoded.
    Utf8,
}

impl FromStr for SourceEncoding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            "utf8" | "utf-8" => Ok(Self::Utf8),
            other => Err(format!(
                "unknown encoding '{other}' (expected 'iso-8859-1' or 'utf-8')"
            )),
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Latin1 => "iso-8859-1",
            Self::Utf8 => "utf-8",
        })
    }
}

/// Reads all issues from a ChiliProject export file.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read, decoded or parsed.
pub fn load_source_issues(
    path: &Path,
    encoding: SourceEncoding,
) -> Result<Vec<SourceIssue>, SourceError> {
    info!(path = %path.display(), %encoding, "Reading ChiliProject export");

    let bytes = std::fs::read(path).map_err(|e| SourceError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let text = decode(bytes, encoding).map_err(|e| SourceError::EncodingError {
        path: path.display().to_string(),
        source: e,
    })?;

    let issues = parse_source_issues(&text, &path.display().to_string())?;
    info!(count = issues.len(), "Loaded source issues");
    Ok(issues)
}

/// Parses export text into issues, preserving row order.
///
/// `origin` is only used to label errors.
///
/// # Errors
///
/// Returns [`SourceError::CsvError`] if a row is malformed or a required column is missing.
pub fn parse_source_issues(text: &str, origin: &str) -> Result<Vec<SourceIssue>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let mut issues = Vec::new();
    for row in reader.deserialize::<SourceIssue>() {
        let issue = row.map_err(|e| SourceError::CsvError {
            path: origin.to_string(),
            source: e,
        })?;
        debug!(number = %issue.number, subject = %issue.subject, "Parsed source issue");
        issues.push(issue);
    }

    Ok(issues)
}

/// Decodes raw export bytes.
fn decode(bytes: Vec<u8>, encoding: SourceEncoding) -> Result<String, std::string::FromUtf8Error> {
    match encoding {
        // Every ISO-8859-1 byte is the Unicode code point of the same value.
        SourceEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        SourceEncoding::Utf8 => String::from_utf8(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str =
        "#,Project,Tracker,Status,Priority,Subject,Author,Assignee,Category,Created,Updated,Due date,% Done,Description";

    #[test]
    fn parses_rows_in_file_order() {
        let text = format!(
            "{HEADER}\n\
             12,Website,Bug,Closed,Normal,First,Jane,,,2013-01-01 10:00,2013-01-02 11:00,,100,\"Line one\nline two, with comma\"\n\
             13,Intranet,Feature,New,High,Second,Bob,Jane,UI,2013-02-01 10:00,2013-02-01 10:00,2013-03-01,0,\"He said \"\"hi\"\"\"\n"
        );

        let issues = parse_source_issues(&text, "test").unwrap();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].subject, "First");
        assert_eq!(issues[0].description, "Line one\nline two, with comma");
        assert_eq!(issues[0].assignee, "");
        assert_eq!(issues[1].number, "13");
        assert_eq!(issues[1].description, "He said \"hi\"");
        assert_eq!(issues[1].due_date, "2013-03-01");
    }

    #[test]
    fn missing_column_is_an_error() {
        let text = "#,Project,Subject\n1,Website,Hello\n";

        let result = parse_source_issues(text, "test");
        assert!(matches!(result, Err(SourceError::CsvError { .. })));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let text = format!("{HEADER},Target version\n1,Website,Bug,New,Normal,S,Jane,,,c,u,,0,d,1.0\n");

        let issues = parse_source_issues(&text, "test").unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].project, "Website");
    }

    #[test]
    fn decodes_latin1_export() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("export.csv");
        let mut bytes = format!("{HEADER}\n1,Website,Bug,New,Normal,").into_bytes();
        // "Grüße" in ISO-8859-1
        bytes.extend_from_slice(&[b'G', b'r', 0xFC, 0xDF, b'e']);
        bytes.extend_from_slice(b",Jane,,,c,u,,0,d\n");
        fs::write(&path, bytes).unwrap();

        let issues = load_source_issues(&path, SourceEncoding::Latin1).unwrap();
        assert_eq!(issues[0].subject, "Grüße");
    }

    #[test]
    fn utf8_rejects_latin1_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("export.csv");
        fs::write(&path, [b'#', 0xFC, b'\n']).unwrap();

        let result = load_source_issues(&path, SourceEncoding::Utf8);
        assert!(matches!(result, Err(SourceError::EncodingError { .. })));
    }

    #[test]
    fn parses_encoding_names() {
        assert_eq!("ISO-8859-1".parse::<SourceEncoding>(), Ok(SourceEncoding::Latin1));
        assert_eq!("utf-8".parse::<SourceEncoding>(), Ok(SourceEncoding::Utf8));
        assert!("ebcdic".parse::<SourceEncoding>().is_err());
    }

    #[test]
    fn lowercase_keys() {
        let issue = SourceIssue {
            project: "Website".to_string(),
            author: "Jane Doe".to_string(),
            ..Default::default()
        };

        assert_eq!(issue.project_key(), "website");
        assert_eq!(issue.author_key(), "jane doe");
        assert_eq!(issue.assignee_key(), None);
    }
}
