//! Matching ChiliProject names against the GitLab name directory.
//!
//! Everything here runs before the first issue is created, so a bad mapping
//! or a missing token stops the run while GitLab is still untouched.

mod error;

pub use error::ReconcileError;

use crate::config::MigrationSettings;
use crate::directory::NameDirectory;
use crate::source::SourceIssue;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Resolved ChiliProject project name to GitLab project id mapping.
///
/// Covers every project referenced by the source issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMapping {
    ids: HashMap<String, u64>,
}

impl ProjectMapping {
    /// Returns the GitLab project id for a lowercase ChiliProject project name.
    #[must_use]
    pub fn project_id(&self, source_name: &str) -> Option<u64> {
        self.ids.get(source_name).copied()
    }

    /// Number of mapped source projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Collects the distinct lowercase project names used by the source issues.
#[must_use]
pub fn source_project_names(issues: &[SourceIssue]) -> BTreeSet<String> {
    issues.iter().map(SourceIssue::project_key).collect()
}

/// Maps every source project name to a GitLab project id.
///
/// A manual mapping entry takes priority over a GitLab project with the same
/// name as the source project.
///
/// # Errors
///
/// Returns [`ReconcileError::UnmappedProjects`] listing, sorted, every name
/// that neither exists in GitLab nor has a manual mapping, and
/// [`ReconcileError::UnknownMappingTargets`] if a used manual mapping points at
/// a project GitLab does not have.
pub fn reconcile_projects(
    source_names: &BTreeSet<String>,
    directory: &NameDirectory,
    manual_mapping: &HashMap<String, String>,
) -> Result<ProjectMapping, ReconcileError> {
    let unmapped: Vec<String> = source_names
        .iter()
        .filter(|name| !directory.has_project(name) && !manual_mapping.contains_key(*name))
        .cloned()
        .collect();

    if !unmapped.is_empty() {
        return Err(ReconcileError::UnmappedProjects { names: unmapped });
    }

    let mut ids = HashMap::with_capacity(source_names.len());
    let mut unknown_targets = Vec::new();

    for name in source_names {
        let target = manual_mapping.get(name).unwrap_or(name);
        match directory.project_id(target) {
            Some(id) => {
                debug!(source = %name, target = %target, id, "Mapped project");
                ids.insert(name.clone(), id);
            }
            None => unknown_targets.push(format!("{name} -> {target}")),
        }
    }

    if !unknown_targets.is_empty() {
        return Err(ReconcileError::UnknownMappingTargets {
            mappings: unknown_targets,
        });
    }

    info!(count = ids.len(), "Projects reconciled");
    Ok(ProjectMapping { ids })
}

/// Checks that every issue author has a private token.
///
/// # Errors
///
/// Returns [`ReconcileError::MissingAuthorToken`] naming the first author, in
/// file order, without a token.
pub fn validate_authors(
    issues: &[SourceIssue],
    settings: &MigrationSettings,
) -> Result<(), ReconcileError> {
    match issues.iter().find(|issue| !settings.has_token(&issue.author)) {
        Some(issue) => Err(ReconcileError::MissingAuthorToken {
            author: issue.author_key(),
        }),
        None => Ok(()),
    }
}

/// Checks that every non-empty assignee exists as a GitLab user.
///
/// # Errors
///
/// Returns [`ReconcileError::UnknownAssignees`] listing the missing names, sorted.
pub fn validate_assignees(
    issues: &[SourceIssue],
    directory: &NameDirectory,
) -> Result<(), ReconcileError> {
    let missing: BTreeSet<String> = issues
        .iter()
        .filter_map(SourceIssue::assignee_key)
        .filter(|name| directory.user_id(name).is_none())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReconcileError::UnknownAssignees {
            names: missing.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::fake::entry;

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    fn directory() -> NameDirectory {
        NameDirectory::from_entries(
            vec![entry(42, "Website"), entry(7, "Intranet 2"), entry(9, "Legacy")],
            vec![entry(3, "Jane Doe")],
        )
    }

    fn issue(project: &str, author: &str, assignee: &str) -> SourceIssue {
        SourceIssue {
            project: project.to_string(),
            author: author.to_string(),
            assignee: assignee.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn maps_matching_names() {
        let result = reconcile_projects(&names(&["website"]), &directory(), &HashMap::new());

        assert_eq!(result.unwrap().project_id("website"), Some(42));
    }

    #[test]
    fn reports_all_unresolvable_names_sorted() {
        let result = reconcile_projects(
            &names(&["zeta", "website", "intranet", "alpha"]),
            &directory(),
            &mapping(&[("alpha", "website")]),
        );

        assert_eq!(
            result,
            Err(ReconcileError::UnmappedProjects {
                names: vec!["intranet".to_string(), "zeta".to_string()]
            })
        );
    }

    #[test]
    fn manual_mapping_takes_priority() {
        let result = reconcile_projects(
            &names(&["legacy", "intranet"]),
            &directory(),
            &mapping(&[("legacy", "website"), ("intranet", "intranet 2")]),
        )
        .unwrap();

        assert_eq!(result.project_id("legacy"), Some(42));
        assert_eq!(result.project_id("intranet"), Some(7));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn unknown_mapping_target_is_an_error() {
        let result = reconcile_projects(
            &names(&["old"]),
            &directory(),
            &mapping(&[("old", "missing")]),
        );

        assert_eq!(
            result,
            Err(ReconcileError::UnknownMappingTargets {
                mappings: vec!["old -> missing".to_string()]
            })
        );
    }

    #[test]
    fn unused_mappings_are_ignored() {
        let result = reconcile_projects(
            &names(&["website"]),
            &directory(),
            &mapping(&[("other", "nowhere")]),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn collects_lowercase_source_names() {
        let issues = vec![
            issue("Website", "jane", ""),
            issue("WEBSITE", "jane", ""),
            issue("Intranet", "jane", ""),
        ];

        assert_eq!(source_project_names(&issues), names(&["intranet", "website"]));
    }

    #[test]
    fn reports_first_author_without_token() {
        let settings = MigrationSettings::parse(
            r#"
api-url = "https://gitlab.example.com/api/v4"
read-author = "jane"

[tokens]
jane = "t"
"#,
            "test",
        )
        .unwrap();
        let issues = vec![
            issue("Website", "Jane", ""),
            issue("Website", "Bob", ""),
            issue("Website", "Carl", ""),
        ];

        assert_eq!(
            validate_authors(&issues, &settings),
            Err(ReconcileError::MissingAuthorToken {
                author: "bob".to_string()
            })
        );
        assert!(validate_authors(&issues[..1], &settings).is_ok());
    }

    #[test]
    fn reports_unknown_assignees() {
        let issues = vec![
            issue("Website", "jane", "Jane Doe"),
            issue("Website", "jane", ""),
            issue("Website", "jane", "Zed"),
            issue("Website", "jane", "Adam"),
        ];

        assert_eq!(
            validate_assignees(&issues, &directory()),
            Err(ReconcileError::UnknownAssignees {
                names: vec!["adam".to_string(), "zed".to_string()]
            })
        );
        assert!(validate_assignees(&issues[..2], &directory()).is_ok());
    }
}
