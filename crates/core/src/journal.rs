//! Journal, journal detail, issue and project domain types.
//!
//! A journal is one note or change-log entry on an issue. Its details record
//! field-level changes and are owned exclusively by the journal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of journal notes in characters.
pub const MAX_NOTES_LENGTH: usize = 65_535;

/// Detail property kinds.
pub const PROPERTY_ATTR: &str = "attr";
pub const PROPERTY_CUSTOM_FIELD: &str = "cf";
pub const PROPERTY_RELATION: &str = "relation";
pub const PROPERTY_ATTACHMENT: &str = "attachment";

/// Issue attributes whose changes are long text and can be diffed.
pub const DIFFABLE_ATTRIBUTES: &[&str] = &["description"];

/// A single field change recorded by a journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalDetail {
    pub id: DbId,
    pub journal_id: DbId,
    pub property: String,
    pub prop_key: String,
    pub old_value: Option<String>,
    pub value: Option<String>,
}

impl JournalDetail {
    /// Whether this detail carries a long-text attribute change.
    pub fn is_diffable(&self) -> bool {
        self.property == PROPERTY_ATTR && DIFFABLE_ATTRIBUTES.contains(&self.prop_key.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub id: DbId,
    pub issue_id: DbId,
    /// Project of the parent issue; permissions are scoped by it.
    pub project_id: DbId,
    pub user_id: DbId,
    pub author_name: String,
    pub notes: String,
    pub private_notes: bool,
    pub details: Vec<JournalDetail>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Journal {
    pub fn detail(&self, detail_id: DbId) -> Option<&JournalDetail> {
        self.details.iter().find(|d| d.id == detail_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: DbId,
    pub project_id: DbId,
    pub subject: String,
    pub description: Option<String>,
    pub author_id: DbId,
    pub author_name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub identifier: String,
    pub name: String,
}

/// Input for a new journal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewJournal {
    pub issue_id: DbId,
    pub user_id: DbId,
    pub notes: String,
    pub private_notes: bool,
    pub details: Vec<NewJournalDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalDetail {
    pub property: String,
    pub prop_key: String,
    pub old_value: Option<String>,
    pub value: Option<String>,
}

impl NewJournalDetail {
    pub fn attr(prop_key: &str, old_value: Option<&str>, value: Option<&str>) -> Self {
        Self {
            property: PROPERTY_ATTR.to_string(),
            prop_key: prop_key.to_string(),
            old_value: old_value.map(str::to_string),
            value: value.map(str::to_string),
        }
    }
}

/// Whether notes are empty once surrounding whitespace is removed.
pub fn notes_are_blank(notes: &str) -> bool {
    notes.trim().is_empty()
}

/// Validate notes submitted for a new journal: non-blank and within the limit.
pub fn validate_notes(notes: &str) -> Result<(), CoreError> {
    if notes_are_blank(notes) {
        return Err(CoreError::Validation("Notes cannot be blank".to_string()));
    }
    validate_notes_length(notes)
}

/// Validate only the length of notes.
pub fn validate_notes_length(notes: &str) -> Result<(), CoreError> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(CoreError::Validation(format!(
            "Notes exceed maximum length of {MAX_NOTES_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Name shown for a user: `"first last"`, or the login when both are empty.
pub fn display_name(firstname: &str, lastname: &str, login: &str) -> String {
    let full = format!("{} {}", firstname.trim(), lastname.trim());
    let full = full.trim();
    if full.is_empty() {
        login.to_string()
    } else {
        full.to_string()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn whitespace_only_notes_are_blank() {
        assert!(notes_are_blank(""));
        assert!(notes_are_blank("  \n\t "));
        assert!(!notes_are_blank(" x "));
    }

    #[test]
    fn blank_notes_fail_validation() {
        assert_matches!(validate_notes("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_notes_fail_validation() {
        let notes = "a".repeat(MAX_NOTES_LENGTH + 1);
        assert_matches!(validate_notes(&notes), Err(CoreError::Validation(msg)) if msg.contains("maximum length"));
        assert!(validate_notes(&"a".repeat(MAX_NOTES_LENGTH)).is_ok());
    }

    #[test]
    fn display_name_falls_back_to_login() {
        assert_eq!(display_name("John", "Smith", "jsmith"), "John Smith");
        assert_eq!(display_name("", "Smith", "jsmith"), "Smith");
        assert_eq!(display_name(" ", "", "jsmith"), "jsmith");
    }

    #[test]
    fn only_description_attribute_is_diffable() {
        let mut detail = JournalDetail {
            id: 1,
            journal_id: 1,
            property: PROPERTY_ATTR.to_string(),
            prop_key: "description".to_string(),
            old_value: None,
            value: Some("text".to_string()),
        };
        assert!(detail.is_diffable());

        detail.prop_key = "status_id".to_string();
        assert!(!detail.is_diffable());

        detail.property = PROPERTY_CUSTOM_FIELD.to_string();
        detail.prop_key = "description".to_string();
        assert!(!detail.is_diffable());
    }
}
