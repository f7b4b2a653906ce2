//! Repository for the `journals` and `journal_details` tables.

use std::collections::HashMap;

use issuelog_core::journal::{Journal, JournalDetail, NewJournal};
use issuelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::journal::{JournalDetailRow, JournalRow};

/// Journal columns joined with the issue's project and the author's name.
const SELECT_JOURNALS: &str = "SELECT j.id, j.issue_id, i.project_id, j.user_id, \
    u.login AS author_login, u.firstname AS author_firstname, u.lastname AS author_lastname, \
    j.notes, j.private_notes, j.created_at, j.updated_at \
    FROM journals j \
    JOIN issues i ON i.id = j.issue_id \
    JOIN users u ON u.id = j.user_id";

/// Display order for journal listings.
const ORDER_BY: &str = "ORDER BY j.created_at ASC, j.id ASC";

/// Column list for journal_details queries.
const DETAIL_COLUMNS: &str = "id, journal_id, property, prop_key, old_value, value";

/// Provides CRUD operations for journals and their details.
pub struct JournalRepo;

impl JournalRepo {
    /// List all journals of an issue with details, oldest first.
    pub async fn list_for_issue(pool: &PgPool, issue_id: DbId) -> Result<Vec<Journal>, sqlx::Error> {
        let query = format!("{SELECT_JOURNALS} WHERE j.issue_id = $1 {ORDER_BY}");
        let rows = sqlx::query_as::<_, JournalRow>(&query)
            .bind(issue_id)
            .fetch_all(pool)
            .await?;
        Self::attach_details(pool, rows).await
    }

    /// List all journals of a project's issues with details, oldest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Journal>, sqlx::Error> {
        let query = format!("{SELECT_JOURNALS} WHERE i.project_id = $1 {ORDER_BY}");
        let rows = sqlx::query_as::<_, JournalRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Self::attach_details(pool, rows).await
    }

    /// Find a journal with its details by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Journal>, sqlx::Error> {
        let query = format!("{SELECT_JOURNALS} WHERE j.id = $1");
        let row = sqlx::query_as::<_, JournalRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::attach_details(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Insert a journal and its details in one transaction.
    pub async fn create(pool: &PgPool, input: &NewJournal) -> Result<Journal, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO journals (issue_id, user_id, notes, private_notes)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(input.issue_id)
        .bind(input.user_id)
        .bind(&input.notes)
        .bind(input.private_notes)
        .fetch_one(&mut *tx)
        .await?;

        for detail in &input.details {
            sqlx::query(
                "INSERT INTO journal_details (journal_id, property, prop_key, old_value, value)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(id)
            .bind(&detail.property)
            .bind(&detail.prop_key)
            .bind(&detail.old_value)
            .bind(&detail.value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Replace the notes of a journal and, when given, its private flag.
    ///
    /// Returns `None` if the journal does not exist.
    pub async fn update_notes(
        pool: &PgPool,
        id: DbId,
        notes: &str,
        private_notes: Option<bool>,
    ) -> Result<Option<Journal>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE journals SET
                notes = $1,
                private_notes = COALESCE($2, private_notes)
             WHERE id = $3",
        )
        .bind(notes)
        .bind(private_notes)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Delete a journal and its details in one transaction.
    ///
    /// Returns `true` if a journal was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM journal_details WHERE journal_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM journals WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of journals.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM journals")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Load the details of `rows` in one query and build domain journals.
    async fn attach_details(
        pool: &PgPool,
        rows: Vec<JournalRow>,
    ) -> Result<Vec<Journal>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM journal_details
             WHERE journal_id = ANY($1)
             ORDER BY id ASC"
        );
        let details = sqlx::query_as::<_, JournalDetailRow>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_journal: HashMap<DbId, Vec<JournalDetail>> = HashMap::new();
        for detail in details {
            by_journal
                .entry(detail.journal_id)
                .or_default()
                .push(detail.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let details = by_journal.remove(&row.id).unwrap_or_default();
                row.into_journal(details)
            })
            .collect())
    }
}
