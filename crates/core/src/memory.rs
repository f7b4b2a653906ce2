//! In-memory [`JournalStore`] and [`PermissionOracle`] implementations.
//!
//! Used by tests and by local runs without a database. State lives behind a
//! tokio `RwLock`; every write takes the lock once, so a delete removes the
//! journal and its details together.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::journal::{Issue, Journal, JournalDetail, NewJournal, Project};
use crate::permissions::{Permission, PermissionSet};
use crate::store::{Grant, JournalStore, PermissionOracle, StoreError, StoreResult};
use crate::types::DbId;

#[derive(Default)]
struct StoreState {
    projects: BTreeMap<DbId, Project>,
    issues: BTreeMap<DbId, Issue>,
    journals: BTreeMap<DbId, Journal>,
    users: HashMap<DbId, String>,
    next_journal_id: DbId,
    next_detail_id: DbId,
}

impl StoreState {
    fn sorted(mut journals: Vec<Journal>) -> Vec<Journal> {
        journals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        journals
    }
}

/// Journal store backed by process memory.
#[derive(Default)]
pub struct MemoryJournalStore {
    state: RwLock<StoreState>,
}

impl MemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_project(&self, project: Project) {
        self.state.write().await.projects.insert(project.id, project);
    }

    pub async fn add_issue(&self, issue: Issue) {
        let mut state = self.state.write().await;
        state.users.insert(issue.author_id, issue.author_name.clone());
        state.issues.insert(issue.id, issue);
    }

    /// Register the display name used as journal author for `user_id`.
    pub async fn add_user(&self, user_id: DbId, name: &str) {
        self.state.write().await.users.insert(user_id, name.to_string());
    }
}

#[async_trait]
impl JournalStore for MemoryJournalStore {
    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(self.state.read().await.projects.get(&id).cloned())
    }

    async fn find_issue(&self, id: DbId) -> StoreResult<Option<Issue>> {
        Ok(self.state.read().await.issues.get(&id).cloned())
    }

    async fn list_for_issue(&self, issue_id: DbId) -> StoreResult<Vec<Journal>> {
        let state = self.state.read().await;
        let journals = state
            .journals
            .values()
            .filter(|j| j.issue_id == issue_id)
            .cloned()
            .collect();
        Ok(StoreState::sorted(journals))
    }

    async fn list_for_project(&self, project_id: DbId) -> StoreResult<Vec<Journal>> {
        let state = self.state.read().await;
        let journals = state
            .journals
            .values()
            .filter(|j| j.project_id == project_id)
            .cloned()
            .collect();
        Ok(StoreState::sorted(journals))
    }

    async fn find_journal(&self, id: DbId) -> StoreResult<Option<Journal>> {
        Ok(self.state.read().await.journals.get(&id).cloned())
    }

    async fn create_journal(&self, input: &NewJournal) -> StoreResult<Journal> {
        let mut state = self.state.write().await;
        let issue = state
            .issues
            .get(&input.issue_id)
            .cloned()
            .ok_or(StoreError::Missing {
                entity: "Issue",
                id: input.issue_id,
            })?;

        state.next_journal_id += 1;
        let id = state.next_journal_id;

        let mut details = Vec::with_capacity(input.details.len());
        for d in &input.details {
            state.next_detail_id += 1;
            details.push(JournalDetail {
                id: state.next_detail_id,
                journal_id: id,
                property: d.property.clone(),
                prop_key: d.prop_key.clone(),
                old_value: d.old_value.clone(),
                value: d.value.clone(),
            });
        }

        let author_name = state
            .users
            .get(&input.user_id)
            .cloned()
            .unwrap_or_else(|| format!("User {}", input.user_id));
        let now = chrono::Utc::now();
        let journal = Journal {
            id,
            issue_id: issue.id,
            project_id: issue.project_id,
            user_id: input.user_id,
            author_name,
            notes: input.notes.clone(),
            private_notes: input.private_notes,
            details,
            created_at: now,
            updated_at: now,
        };
        state.journals.insert(id, journal.clone());
        Ok(journal)
    }

    async fn update_notes(
        &self,
        id: DbId,
        notes: &str,
        private_notes: Option<bool>,
    ) -> StoreResult<Journal> {
        let mut state = self.state.write().await;
        let journal = state.journals.get_mut(&id).ok_or(StoreError::Missing {
            entity: "Journal",
            id,
        })?;
        journal.notes = notes.to_string();
        if let Some(private_notes) = private_notes {
            journal.private_notes = private_notes;
        }
        journal.updated_at = chrono::Utc::now();
        Ok(journal.clone())
    }

    async fn delete_journal(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.state.write().await.journals.remove(&id).is_some())
    }

    async fn count_journals(&self) -> StoreResult<i64> {
        Ok(self.state.read().await.journals.len() as i64)
    }
}

/// Permission oracle holding explicit grants per `(user, project)`.
#[derive(Default)]
pub struct StaticPermissionOracle {
    grants: RwLock<HashMap<(DbId, DbId), PermissionSet>>,
    admins: RwLock<HashSet<DbId>>,
}

impl StaticPermissionOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the permissions of `user_id` on `project_id`.
    pub async fn grant(&self, user_id: DbId, project_id: DbId, permissions: &[Permission]) {
        self.grants
            .write()
            .await
            .insert((user_id, project_id), permissions.iter().copied().collect());
    }

    pub async fn add_permission(&self, user_id: DbId, project_id: DbId, permission: Permission) {
        self.grants
            .write()
            .await
            .entry((user_id, project_id))
            .or_default()
            .insert(permission);
    }

    pub async fn remove_permission(&self, user_id: DbId, project_id: DbId, permission: Permission) {
        if let Some(set) = self.grants.write().await.get_mut(&(user_id, project_id)) {
            set.remove(permission);
        }
    }

    pub async fn set_admin(&self, user_id: DbId, is_admin: bool) {
        let mut admins = self.admins.write().await;
        if is_admin {
            admins.insert(user_id);
        } else {
            admins.remove(&user_id);
        }
    }
}

#[async_trait]
impl PermissionOracle for StaticPermissionOracle {
    async fn grant_for(&self, user_id: DbId, project_id: DbId) -> StoreResult<Grant> {
        let permissions = self
            .grants
            .read()
            .await
            .get(&(user_id, project_id))
            .cloned()
            .unwrap_or_default();
        let is_admin = self.admins.read().await.contains(&user_id);
        Ok(Grant {
            is_admin,
            permissions,
        })
    }
}
