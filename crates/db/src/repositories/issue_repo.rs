//! Repository for the `issues` table.

use issuelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::issue::{CreateIssue, IssueRow};

/// Issue columns joined with the author's name columns.
const SELECT_ISSUES: &str = "SELECT i.id, i.project_id, i.subject, i.description, i.author_id, \
    u.login AS author_login, u.firstname AS author_firstname, u.lastname AS author_lastname, \
    i.created_at \
    FROM issues i \
    JOIN users u ON u.id = i.author_id";

/// Provides read access to issues, plus inserts for seeding.
pub struct IssueRepo;

impl IssueRepo {
    /// Insert a new issue, returning its ID.
    pub async fn create(pool: &PgPool, input: &CreateIssue) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO issues (project_id, subject, description, author_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(input.project_id)
        .bind(&input.subject)
        .bind(&input.description)
        .bind(input.author_id)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<IssueRow>, sqlx::Error> {
        let query = format!("{SELECT_ISSUES} WHERE i.id = $1");
        sqlx::query_as::<_, IssueRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
