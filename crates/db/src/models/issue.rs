//! Issue model: the parent entity journals attach to.

use issuelog_core::journal::{display_name, Issue};
use issuelog_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An `issues` row joined with its author's name columns.
#[derive(Debug, Clone, FromRow)]
pub struct IssueRow {
    pub id: DbId,
    pub project_id: DbId,
    pub subject: String,
    pub description: Option<String>,
    pub author_id: DbId,
    pub author_login: String,
    pub author_firstname: String,
    pub author_lastname: String,
    pub created_at: Timestamp,
}

impl From<IssueRow> for Issue {
    fn from(row: IssueRow) -> Self {
        Self {
            author_name: display_name(&row.author_firstname, &row.author_lastname, &row.author_login),
            id: row.id,
            project_id: row.project_id,
            subject: row.subject,
            description: row.description,
            author_id: row.author_id,
            created_at: row.created_at,
        }
    }
}

/// DTO for creating a new issue.
#[derive(Debug, Clone)]
pub struct CreateIssue {
    pub project_id: DbId,
    pub subject: String,
    pub description: Option<String>,
    pub author_id: DbId,
}
