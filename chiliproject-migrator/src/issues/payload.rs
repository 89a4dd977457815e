//! GitLab issue payload construction.

use crate::directory::NameDirectory;
use crate::gitlab::NewIssue;
use crate::issues::IssueError;
use crate::source::SourceIssue;

/// Builds the description: the original text followed by one line per
/// non-empty history field.
#[must_use]
pub fn build_description(issue: &SourceIssue) -> String {
    let mut description = format!("{}\n\n", issue.description);
    for (key, value) in issue.history_fields() {
        if !value.is_empty() {
            description.push_str(&format!("{key}: {value}\n"));
        }
    }
    description
}

/// Builds the comma separated label list.
///
/// An empty category is left out instead of producing an empty label.
#[must_use]
pub fn build_labels(issue: &SourceIssue, migration_label: &str) -> String {
    let priority = format!("Priority {}", issue.priority);
    let tracker = format!("Type {}", issue.tracker);

    [
        priority.as_str(),
        tracker.as_str(),
        issue.category.as_str(),
        migration_label,
    ]
    .into_iter()
    .filter(|label| !label.is_empty())
    .collect::<Vec<_>>()
    .join(",")
}

/// Builds the creation payload for a source issue.
///
/// # Errors
///
/// Returns [`IssueError::UnknownAssignee`] if the assignee is not in the directory.
pub fn build_issue(
    issue: &SourceIssue,
    directory: &NameDirectory,
    migration_label: &str,
) -> Result<NewIssue, IssueError> {
    let assignee_id = match issue.assignee_key() {
        Some(name) => Some(
            directory
                .user_id(&name)
                .ok_or(IssueError::UnknownAssignee { assignee: name })?,
        ),
        None => None,
    };

    Ok(NewIssue {
        title: issue.subject.clone(),
        description: build_description(issue),
        labels: build_labels(issue, migration_label),
        assignee_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::fake::entry;

    fn sample_issue() -> SourceIssue {
        SourceIssue {
            number: "1234".to_string(),
            project: "Website".to_string(),
            author: "Jane".to_string(),
            subject: "Broken link".to_string(),
            description: "The footer link is dead.".to_string(),
            priority: "High".to_string(),
            tracker: "Bug".to_string(),
            category: "Frontend".to_string(),
            status: "New".to_string(),
            assignee: "Jane Doe".to_string(),
            created: "2013-11-19 12:25".to_string(),
            updated: "2013-11-20 08:00".to_string(),
            due_date: String::new(),
            percent_done: "0".to_string(),
        }
    }

    fn directory() -> NameDirectory {
        NameDirectory::from_entries(Vec::new(), vec![entry(3, "Jane Doe")])
    }

    #[test]
    fn description_skips_empty_fields() {
        let description = build_description(&sample_issue());

        assert_eq!(
            description,
            "The footer link is dead.\n\n\
             #: 1234\n\
             Created: 2013-11-19 12:25\n\
             Updated: 2013-11-20 08:00\n\
             % Done: 0\n"
        );
        assert!(!description.contains("Due date"));
    }

    #[test]
    fn description_of_empty_issue_has_no_field_lines() {
        assert_eq!(build_description(&SourceIssue::default()), "\n\n");
    }

    #[test]
    fn labels_include_category_and_marker() {
        assert_eq!(
            build_labels(&sample_issue(), "Chiliproject"),
            "Priority High,Type Bug,Frontend,Chiliproject"
        );
    }

    #[test]
    fn labels_omit_empty_category() {
        let mut issue = sample_issue();
        issue.category.clear();

        assert_eq!(
            build_labels(&issue, "Chiliproject"),
            "Priority High,Type Bug,Chiliproject"
        );
    }

    #[test]
    fn resolves_assignee() {
        let payload = build_issue(&sample_issue(), &directory(), "Chiliproject").unwrap();

        assert_eq!(payload.title, "Broken link");
        assert_eq!(payload.assignee_id, Some(3));
    }

    #[test]
    fn omits_assignee_when_unassigned() {
        let mut issue = sample_issue();
        issue.assignee.clear();

        let payload = build_issue(&issue, &directory(), "Chiliproject").unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(payload.assignee_id, None);
        assert!(json.get("assignee_id").is_none());
    }

    #[test]
    fn unknown_assignee_is_an_error() {
        let mut issue = sample_issue();
        issue.assignee = "Nobody".to_string();

        let result = build_issue(&issue, &directory(), "Chiliproject");
        assert!(matches!(result, Err(IssueError::UnknownAssignee { .. })));
    }
}
