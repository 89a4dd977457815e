//! Settings file deserialization and validation.

use crate::config::ConfigError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Largest page size GitLab accepts for list endpoints.
const MAX_PAGE_SIZE: u32 = 100;

/// Raw contents of `migration.toml` before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawSettings {
    api_url: String,
    read_author: String,
    #[serde(default = "default_migration_label")]
    migration_label: String,
    #[serde(default = "default_closed_status")]
    closed_status: String,
    #[serde(default = "default_page_size")]
    page_size: u32,
    #[serde(default)]
    tokens: BTreeMap<String, String>,
    #[serde(default)]
    manual_mapping: BTreeMap<String, String>,
}

/// Label attached to every migrated issue.
pub fn default_migration_label() -> String {
    "Chiliproject".to_string()
}

/// ChiliProject status value that marks an issue as closed.
pub fn default_closed_status() -> String {
    "Closed".to_string()
}

/// Page size used when listing GitLab projects and users.
pub fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

/// Validated migration settings.
///
/// Author names and manual mapping entries are stored lowercase, the same way
/// names are compared everywhere else in the migration.
#[derive(Clone)]
pub struct MigrationSettings {
    /// Base URL of the GitLab API (e.g. `https://gitlab.example.com/api/v4`).
    pub api_url: Url,

    /// Author whose token is used for the read-only directory listing.
    pub read_author: String,

    /// Marker label added to every created issue.
    pub migration_label: String,

    /// Source status value that triggers closing the created issue.
    pub closed_status: String,

    /// Page size for directory listings.
    pub page_size: u32,

    /// Private tokens keyed by lowercase author name.
    tokens: HashMap<String, String>,

    /// Source project name to GitLab project name overrides.
    pub manual_mapping: HashMap<String, String>,
}

impl fmt::Debug for MigrationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut authors: Vec<&str> = self.tokens.keys().map(String::as_str).collect();
        authors.sort_unstable();
        f.debug_struct("MigrationSettings")
            .field("api_url", &self.api_url.as_str())
            .field("read_author", &self.read_author)
            .field("migration_label", &self.migration_label)
            .field("closed_status", &self.closed_status)
            .field("page_size", &self.page_size)
            .field("token_authors", &authors)
            .field("manual_mapping", &self.manual_mapping)
            .finish()
    }
}

impl MigrationSettings {
    /// Loads and validates a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unparsable or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading migration settings");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parses and validates settings from TOML text.
    ///
    /// `origin` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the content is not valid TOML or fails validation.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: origin.to_string(),
            source: e,
        })?;

        let validation = |message: String| ConfigError::ValidationError {
            path: origin.to_string(),
            message,
        };

        let api_url = Url::parse(&raw.api_url)
            .map_err(|_| validation(format!("api-url is not a valid URL: {}", raw.api_url)))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(validation(format!(
                "api-url must use http or https: {}",
                raw.api_url
            )));
        }

        if raw.page_size == 0 || raw.page_size > MAX_PAGE_SIZE {
            return Err(validation(format!(
                "page-size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                raw.page_size
            )));
        }

        if raw.migration_label.trim().is_empty() {
            return Err(validation("migration-label must not be empty".to_string()));
        }

        let tokens = lowercase_keys(raw.tokens, "tokens").map_err(&validation)?;
        if let Some((author, _)) = tokens.iter().find(|(_, token)| token.trim().is_empty()) {
            return Err(validation(format!("token for author '{author}' is empty")));
        }

        let read_author = raw.read_author.trim().to_lowercase();
        if read_author.is_empty() {
            return Err(validation("read-author must not be empty".to_string()));
        }
        if !tokens.contains_key(&read_author) {
            return Err(validation(format!(
                "read-author '{read_author}' has no entry in [tokens]"
            )));
        }

        let manual_mapping = lowercase_keys(raw.manual_mapping, "manual-mapping")
            .map_err(&validation)?
            .into_iter()
            .map(|(source, target)| (source, target.to_lowercase()))
            .collect();

        Ok(Self {
            api_url,
            read_author,
            migration_label: raw.migration_label,
            closed_status: raw.closed_status,
            page_size: raw.page_size,
            tokens,
            manual_mapping,
        })
    }

    /// Returns the private token of an author, matched case-insensitively.
    #[must_use]
    pub fn token_for(&self, author: &str) -> Option<&str> {
        self.tokens.get(&author.to_lowercase()).map(String::as_str)
    }

    /// Returns the token used for read-only directory listings.
    #[must_use]
    pub fn read_token(&self) -> &str {
        // Presence is checked in `parse`.
        self.tokens
            .get(&self.read_author)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Returns true if the author has a configured token.
    #[must_use]
    pub fn has_token(&self, author: &str) -> bool {
        self.token_for(author).is_some()
    }
}

/// Lowercases the keys of a table, rejecting keys that collide afterwards.
fn lowercase_keys(
    table: BTreeMap<String, String>,
    table_name: &str,
) -> Result<HashMap<String, String>, String> {
    let mut lowered = HashMap::with_capacity(table.len());
    for (key, value) in table {
        let key = key.trim().to_lowercase();
        if lowered.insert(key.clone(), value).is_some() {
            return Err(format!(
                "[{table_name}] contains '{key}' more than once (names are case-insensitive)"
            ));
        }
    }
    Ok(lowered)
}
