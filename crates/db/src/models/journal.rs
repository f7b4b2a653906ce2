//! Journal and journal detail rows.

use issuelog_core::journal::{display_name, Journal, JournalDetail};
use issuelog_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A `journals` row joined with the issue's project and the author's name.
#[derive(Debug, Clone, FromRow)]
pub struct JournalRow {
    pub id: DbId,
    pub issue_id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub author_login: String,
    pub author_firstname: String,
    pub author_lastname: String,
    pub notes: String,
    pub private_notes: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl JournalRow {
    /// Build the domain journal, attaching `details`.
    pub fn into_journal(self, details: Vec<JournalDetail>) -> Journal {
        Journal {
            author_name: display_name(
                &self.author_firstname,
                &self.author_lastname,
                &self.author_login,
            ),
            id: self.id,
            issue_id: self.issue_id,
            project_id: self.project_id,
            user_id: self.user_id,
            notes: self.notes,
            private_notes: self.private_notes,
            details,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A row from the `journal_details` table.
#[derive(Debug, Clone, FromRow)]
pub struct JournalDetailRow {
    pub id: DbId,
    pub journal_id: DbId,
    pub property: String,
    pub prop_key: String,
    pub old_value: Option<String>,
    pub value: Option<String>,
}

impl From<JournalDetailRow> for JournalDetail {
    fn from(row: JournalDetailRow) -> Self {
        Self {
            id: row.id,
            journal_id: row.journal_id,
            property: row.property,
            prop_key: row.prop_key,
            old_value: row.old_value,
            value: row.value,
        }
    }
}
