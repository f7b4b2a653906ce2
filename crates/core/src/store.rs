//! Storage and permission seams used by the journal gate.
//!
//! [`JournalStore`] persists journals and resolves their parent issues and
//! projects. [`PermissionOracle`] answers which permissions a user holds on a
//! project. Both are object-safe so the HTTP layer can hold them as
//! `Arc<dyn ...>` and swap the PostgreSQL implementations for the in-memory
//! ones in [`crate::memory`].

use async_trait::async_trait;

use crate::journal::{Issue, Journal, NewJournal, Project};
use crate::permissions::PermissionSet;
use crate::types::DbId;

/// Failure inside a store or oracle implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The row targeted by a write no longer exists.
    #[error("{entity} with id {id} does not exist")]
    Missing { entity: &'static str, id: DbId },

    /// Backend failure (connection, query, serialization).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for journals and the issues and projects they hang off.
#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;

    async fn find_issue(&self, id: DbId) -> StoreResult<Option<Issue>>;

    /// Journals of one issue with their details, oldest first.
    async fn list_for_issue(&self, issue_id: DbId) -> StoreResult<Vec<Journal>>;

    /// Journals of every issue of one project with their details, oldest first.
    async fn list_for_project(&self, project_id: DbId) -> StoreResult<Vec<Journal>>;

    async fn find_journal(&self, id: DbId) -> StoreResult<Option<Journal>>;

    /// Insert a journal and its details as one unit.
    async fn create_journal(&self, input: &NewJournal) -> StoreResult<Journal>;

    /// Replace the notes (and optionally the private flag) of a journal.
    async fn update_notes(
        &self,
        id: DbId,
        notes: &str,
        private_notes: Option<bool>,
    ) -> StoreResult<Journal>;

    /// Delete a journal and its details as one unit.
    ///
    /// Returns `false` when the journal did not exist.
    async fn delete_journal(&self, id: DbId) -> StoreResult<bool>;

    async fn count_journals(&self) -> StoreResult<i64>;
}

/// Effective permissions of a user on a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grant {
    pub is_admin: bool,
    pub permissions: PermissionSet,
}

/// Answers permission questions for a user on a project.
#[async_trait]
pub trait PermissionOracle: Send + Sync {
    /// Union of the permissions of every role the user holds on the project.
    ///
    /// Unknown users and non-members get an empty grant.
    async fn grant_for(&self, user_id: DbId, project_id: DbId) -> StoreResult<Grant>;
}

impl From<StoreError> for crate::error::CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing { entity, id } => Self::NotFound { entity, id },
            StoreError::Backend(msg) => Self::Internal(msg),
        }
    }
}
