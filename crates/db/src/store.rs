//! PostgreSQL implementations of the core storage seams.

use async_trait::async_trait;
use issuelog_core::journal::{Issue, Journal, NewJournal, Project};
use issuelog_core::permissions::{PermissionSet, ANONYMOUS_USER_ID};
use issuelog_core::store::{Grant, JournalStore, PermissionOracle, StoreError, StoreResult};
use issuelog_core::types::DbId;

use crate::repositories::{IssueRepo, JournalRepo, ProjectRepo, RoleRepo, UserRepo};
use crate::DbPool;

fn backend(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Database error");
    StoreError::Backend(err.to_string())
}

/// [`JournalStore`] over the `journals`, `journal_details`, `issues` and
/// `projects` tables.
#[derive(Clone)]
pub struct PgJournalStore {
    pool: DbPool,
}

impl PgJournalStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JournalStore for PgJournalStore {
    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?
            .map(Into::into))
    }

    async fn find_issue(&self, id: DbId) -> StoreResult<Option<Issue>> {
        Ok(IssueRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?
            .map(Into::into))
    }

    async fn list_for_issue(&self, issue_id: DbId) -> StoreResult<Vec<Journal>> {
        JournalRepo::list_for_issue(&self.pool, issue_id)
            .await
            .map_err(backend)
    }

    async fn list_for_project(&self, project_id: DbId) -> StoreResult<Vec<Journal>> {
        JournalRepo::list_for_project(&self.pool, project_id)
            .await
            .map_err(backend)
    }

    async fn find_journal(&self, id: DbId) -> StoreResult<Option<Journal>> {
        JournalRepo::find_by_id(&self.pool, id).await.map_err(backend)
    }

    async fn create_journal(&self, input: &NewJournal) -> StoreResult<Journal> {
        JournalRepo::create(&self.pool, input).await.map_err(|err| {
            // 23503: foreign_key_violation (issue or user vanished)
            if let sqlx::Error::Database(db_err) = &err {
                if db_err.code().as_deref() == Some("23503") {
                    return StoreError::Missing {
                        entity: "Issue",
                        id: input.issue_id,
                    };
                }
            }
            backend(err)
        })
    }

    async fn update_notes(
        &self,
        id: DbId,
        notes: &str,
        private_notes: Option<bool>,
    ) -> StoreResult<Journal> {
        JournalRepo::update_notes(&self.pool, id, notes, private_notes)
            .await
            .map_err(backend)?
            .ok_or(StoreError::Missing {
                entity: "Journal",
                id,
            })
    }

    async fn delete_journal(&self, id: DbId) -> StoreResult<bool> {
        JournalRepo::delete(&self.pool, id).await.map_err(backend)
    }

    async fn count_journals(&self) -> StoreResult<i64> {
        JournalRepo::count(&self.pool).await.map_err(backend)
    }
}

/// [`PermissionOracle`] over `users`, `members` and `roles`, plus the
/// `Anonymous` role for public projects.
#[derive(Clone)]
pub struct PgPermissionOracle {
    pool: DbPool,
}

impl PgPermissionOracle {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionOracle for PgPermissionOracle {
    async fn grant_for(&self, user_id: DbId, project_id: DbId) -> StoreResult<Grant> {
        if user_id == ANONYMOUS_USER_ID {
            let names = RoleRepo::anonymous_permissions_for(&self.pool, project_id)
                .await
                .map_err(backend)?;
            return Ok(Grant {
                is_admin: false,
                permissions: PermissionSet::from_names(names),
            });
        }

        let Some(user) = UserRepo::find_by_id(&self.pool, user_id)
            .await
            .map_err(backend)?
        else {
            return Ok(Grant::default());
        };

        let names = RoleRepo::permissions_for(&self.pool, user_id, project_id)
            .await
            .map_err(backend)?;
        Ok(Grant {
            is_admin: user.is_admin,
            permissions: PermissionSet::from_names(names),
        })
    }
}
