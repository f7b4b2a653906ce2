//! Journal visibility and mutation gate.
//!
//! Every operation on a single journal first resolves it through
//! [`JournalGate::get_if_visible`]. A journal the caller may not see is
//! reported as `NotFound`, whether it is missing or hidden, and no
//! permission-to-act check is ever reached for it. Only visible journals can
//! produce `Forbidden`.

use serde::Serialize;

use crate::diff::{word_diff, DiffChunk};
use crate::error::CoreError;
use crate::journal::{
    notes_are_blank, validate_notes, validate_notes_length, Issue, Journal, NewJournal,
};
use crate::permissions::{AuthContext, Permission};
use crate::quote::{quote_issue, quote_journal};
use crate::store::{JournalStore, PermissionOracle};
use crate::types::DbId;

/// What a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalScope {
    Issue(DbId),
    Project(DbId),
}

/// A journal the caller is allowed to see, with the context that proved it.
#[derive(Debug, Clone)]
pub struct VisibleJournal {
    pub journal: Journal,
    pub ctx: AuthContext,
}

/// Result of editing a journal's notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated(Journal),
    /// The notes were blank, so the journal and its details were removed.
    Deleted(DbId),
}

/// Quoted text used to pre-fill a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub issue_id: DbId,
    pub journal_id: Option<DbId>,
    pub content: String,
}

/// Word diff of one detail of a journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailDiff {
    pub journal_id: DbId,
    pub detail_id: DbId,
    pub prop_key: String,
    pub chunks: Vec<DiffChunk>,
}

/// Whether `journal` may be shown to the holder of `ctx`.
pub fn can_view(journal: &Journal, ctx: &AuthContext) -> bool {
    ctx.project_id == journal.project_id
        && ctx.allows(Permission::ViewIssues)
        && (!journal.private_notes || ctx.allows(Permission::ViewPrivateNotes))
}

/// Keep the journals visible under `ctx`, oldest first (ties by id).
pub fn filter_visible(journals: Vec<Journal>, ctx: &AuthContext) -> Vec<Journal> {
    let mut visible: Vec<Journal> = journals.into_iter().filter(|j| can_view(j, ctx)).collect();
    visible.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    visible
}

/// Edit rights: `edit_issue_notes`, or `edit_own_issue_notes` on one's own
/// journal. Anonymous callers never edit. Call only on a journal already
/// known to be visible.
pub fn authorize_edit(journal: &Journal, ctx: &AuthContext) -> Result<(), CoreError> {
    let allowed = !ctx.is_anonymous()
        && (ctx.allows(Permission::EditIssueNotes)
            || (ctx.allows(Permission::EditOwnIssueNotes) && journal.user_id == ctx.user_id));
    if allowed {
        Ok(())
    } else {
        tracing::debug!(
            user_id = ctx.user_id,
            journal_id = journal.id,
            "Journal edit denied"
        );
        Err(CoreError::Forbidden(
            "You are not allowed to edit this journal".to_string(),
        ))
    }
}

/// Reply rights. Call only once the replied-to issue or journal is visible.
pub fn authorize_reply(ctx: &AuthContext) -> Result<(), CoreError> {
    if ctx.allows(Permission::AddIssueNotes) {
        Ok(())
    } else {
        tracing::debug!(
            user_id = ctx.user_id,
            project_id = ctx.project_id,
            "Reply denied"
        );
        Err(CoreError::Forbidden(
            "You are not allowed to add notes".to_string(),
        ))
    }
}

/// Requested private flag, kept only when the caller may set it.
fn permitted_private_flag(ctx: &AuthContext, requested: Option<bool>) -> Option<bool> {
    match requested {
        Some(flag) if ctx.allows(Permission::SetNotesPrivate) => Some(flag),
        Some(_) => {
            tracing::debug!(
                user_id = ctx.user_id,
                "Ignoring private_notes: set_notes_private not granted"
            );
            None
        }
        None => None,
    }
}

/// Visibility and authorization decisions over a store and an oracle.
pub struct JournalGate<'a> {
    store: &'a dyn JournalStore,
    oracle: &'a dyn PermissionOracle,
}

impl<'a> JournalGate<'a> {
    pub fn new(store: &'a dyn JournalStore, oracle: &'a dyn PermissionOracle) -> Self {
        Self { store, oracle }
    }

    /// Snapshot the permissions of `user_id` on `project_id`.
    pub async fn context(&self, user_id: DbId, project_id: DbId) -> Result<AuthContext, CoreError> {
        let grant = self.oracle.grant_for(user_id, project_id).await?;
        Ok(AuthContext {
            user_id,
            project_id,
            is_admin: grant.is_admin,
            permissions: grant.permissions,
        })
    }

    /// Resolve an issue the user may see; hidden issues are `NotFound`.
    pub async fn visible_issue(
        &self,
        issue_id: DbId,
        user_id: DbId,
    ) -> Result<(Issue, AuthContext), CoreError> {
        let issue = self
            .store
            .find_issue(issue_id)
            .await?
            .ok_or_else(|| CoreError::issue_not_found(issue_id))?;
        let ctx = self.context(user_id, issue.project_id).await?;
        if !ctx.allows(Permission::ViewIssues) {
            tracing::debug!(user_id, issue_id, "Issue hidden from user");
            return Err(CoreError::issue_not_found(issue_id));
        }
        Ok((issue, ctx))
    }

    /// All journals of `scope` the user may see, oldest first.
    pub async fn list_visible(
        &self,
        scope: JournalScope,
        user_id: DbId,
    ) -> Result<Vec<Journal>, CoreError> {
        let (journals, ctx) = match scope {
            JournalScope::Issue(issue_id) => {
                let (_, ctx) = self.visible_issue(issue_id, user_id).await?;
                (self.store.list_for_issue(issue_id).await?, ctx)
            }
            JournalScope::Project(project_id) => {
                self.store
                    .find_project(project_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "Project",
                        id: project_id,
                    })?;
                let ctx = self.context(user_id, project_id).await?;
                if !ctx.allows(Permission::ViewIssues) {
                    return Err(CoreError::Forbidden(
                        "You are not allowed to view issues of this project".to_string(),
                    ));
                }
                (self.store.list_for_project(project_id).await?, ctx)
            }
        };
        Ok(filter_visible(journals, &ctx))
    }

    /// The journal, if it exists and the user may see it.
    pub async fn get_if_visible(
        &self,
        journal_id: DbId,
        user_id: DbId,
    ) -> Result<VisibleJournal, CoreError> {
        let journal = self
            .store
            .find_journal(journal_id)
            .await?
            .ok_or_else(|| CoreError::journal_not_found(journal_id))?;
        let ctx = self.context(user_id, journal.project_id).await?;
        if !can_view(&journal, &ctx) {
            tracing::debug!(user_id, journal_id, "Journal hidden from user");
            return Err(CoreError::journal_not_found(journal_id));
        }
        Ok(VisibleJournal { journal, ctx })
    }

    /// Visibility, then edit rights.
    pub async fn get_for_edit(
        &self,
        journal_id: DbId,
        user_id: DbId,
    ) -> Result<VisibleJournal, CoreError> {
        let visible = self.get_if_visible(journal_id, user_id).await?;
        authorize_edit(&visible.journal, &visible.ctx)?;
        Ok(visible)
    }

    /// Set the notes of an editable journal; blank notes delete it.
    pub async fn apply_edit(
        &self,
        visible: &VisibleJournal,
        notes: &str,
        private_notes: Option<bool>,
    ) -> Result<EditOutcome, CoreError> {
        let id = visible.journal.id;
        if notes_are_blank(notes) {
            if !self.store.delete_journal(id).await? {
                return Err(CoreError::journal_not_found(id));
            }
            return Ok(EditOutcome::Deleted(id));
        }

        validate_notes_length(notes)?;
        let private_notes = permitted_private_flag(&visible.ctx, private_notes);
        let journal = self.store.update_notes(id, notes, private_notes).await?;
        Ok(EditOutcome::Updated(journal))
    }

    /// Visibility, edit rights, then the edit itself.
    pub async fn update_notes(
        &self,
        journal_id: DbId,
        user_id: DbId,
        notes: &str,
        private_notes: Option<bool>,
    ) -> Result<EditOutcome, CoreError> {
        let visible = self.get_for_edit(journal_id, user_id).await?;
        self.apply_edit(&visible, notes, private_notes).await
    }

    /// Quote the description of an issue for a reply.
    pub async fn reply_to_issue(&self, issue_id: DbId, user_id: DbId) -> Result<Reply, CoreError> {
        let (issue, ctx) = self.visible_issue(issue_id, user_id).await?;
        authorize_reply(&ctx)?;
        Ok(Reply {
            issue_id: issue.id,
            journal_id: None,
            content: quote_issue(&issue.author_name, issue.description.as_deref()),
        })
    }

    /// Quote the notes of a journal for a reply.
    pub async fn reply_to_journal(
        &self,
        journal_id: DbId,
        user_id: DbId,
    ) -> Result<Reply, CoreError> {
        let VisibleJournal { journal, ctx } = self.get_if_visible(journal_id, user_id).await?;
        authorize_reply(&ctx)?;

        let indice = self
            .store
            .list_for_issue(journal.issue_id)
            .await?
            .iter()
            .position(|j| j.id == journal.id)
            .map_or(1, |pos| pos + 1);

        Ok(Reply {
            issue_id: journal.issue_id,
            journal_id: Some(journal.id),
            content: quote_journal(&journal.author_name, indice, &journal.notes),
        })
    }

    /// Add a note to an issue.
    pub async fn create_note(
        &self,
        issue_id: DbId,
        user_id: DbId,
        notes: &str,
        private_notes: bool,
    ) -> Result<Journal, CoreError> {
        let (issue, ctx) = self.visible_issue(issue_id, user_id).await?;
        authorize_reply(&ctx)?;
        validate_notes(notes)?;

        let private_notes = permitted_private_flag(&ctx, Some(private_notes)).unwrap_or(false);
        let journal = self
            .store
            .create_journal(&NewJournal {
                issue_id: issue.id,
                user_id,
                notes: notes.to_string(),
                private_notes,
                details: Vec::new(),
            })
            .await?;
        Ok(journal)
    }

    /// Word diff of a long-text detail of a visible journal.
    pub async fn diff_detail(
        &self,
        journal_id: DbId,
        detail_id: DbId,
        user_id: DbId,
    ) -> Result<DetailDiff, CoreError> {
        let VisibleJournal { journal, .. } = self.get_if_visible(journal_id, user_id).await?;
        let detail = journal
            .detail(detail_id)
            .filter(|d| d.is_diffable())
            .ok_or(CoreError::NotFound {
                entity: "JournalDetail",
                id: detail_id,
            })?;

        Ok(DetailDiff {
            journal_id: journal.id,
            detail_id: detail.id,
            prop_key: detail.prop_key.clone(),
            chunks: word_diff(
                detail.old_value.as_deref().unwrap_or_default(),
                detail.value.as_deref().unwrap_or_default(),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::journal::{NewJournalDetail, Project};
    use crate::memory::{MemoryJournalStore, StaticPermissionOracle};
    use crate::permissions::ANONYMOUS_USER_ID;

    const PROJECT: DbId = 1;
    const ADMIN: DbId = 1;
    const JSMITH: DbId = 2;
    const DLOPPER: DbId = 3;

    const MANAGER: &[Permission] = &[
        Permission::ViewIssues,
        Permission::AddIssueNotes,
        Permission::EditIssueNotes,
        Permission::ViewPrivateNotes,
        Permission::SetNotesPrivate,
    ];

    struct Fixture {
        store: MemoryJournalStore,
        oracle: StaticPermissionOracle,
    }

    impl Fixture {
        fn gate(&self) -> JournalGate<'_> {
            JournalGate::new(&self.store, &self.oracle)
        }
    }

    /// Issue 1 with a public note (journal 1, by admin) and a note with a
    /// description change (journal 2, by jsmith).
    async fn fixture() -> Fixture {
        let store = MemoryJournalStore::new();
        store
            .add_project(Project {
                id: PROJECT,
                identifier: "ecookbook".into(),
                name: "eCookbook".into(),
            })
            .await;
        store
            .add_issue(Issue {
                id: 1,
                project_id: PROJECT,
                subject: "Cannot print recipes".into(),
                description: Some("Unable to print recipes".into()),
                author_id: JSMITH,
                author_name: "John Smith".into(),
                created_at: chrono::Utc::now(),
            })
            .await;
        store.add_user(ADMIN, "Redmine Admin").await;
        store.add_user(DLOPPER, "Dave Lopper").await;

        store
            .create_journal(&NewJournal {
                issue_id: 1,
                user_id: ADMIN,
                notes: "Journal notes".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .create_journal(&NewJournal {
                issue_id: 1,
                user_id: JSMITH,
                notes: "Some notes with Redmine links: #2, r2.".into(),
                private_notes: false,
                details: vec![NewJournalDetail::attr(
                    "description",
                    Some("Unable to print recipes"),
                    Some("Unable to print cookbooks"),
                )],
            })
            .await
            .unwrap();

        let oracle = StaticPermissionOracle::new();
        oracle.grant(JSMITH, PROJECT, MANAGER).await;
        oracle.grant(DLOPPER, PROJECT, &[Permission::ViewIssues]).await;

        Fixture { store, oracle }
    }

    async fn add_private_note(f: &Fixture) -> Journal {
        f.store
            .create_journal(&NewJournal {
                issue_id: 1,
                user_id: ADMIN,
                notes: "Privates notes".into(),
                private_notes: true,
                details: Vec::new(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn list_excludes_private_until_permission_granted() {
        let f = fixture().await;
        let private = add_private_note(&f).await;
        f.oracle
            .remove_permission(JSMITH, PROJECT, Permission::ViewPrivateNotes)
            .await;

        let ids: Vec<DbId> = f
            .gate()
            .list_visible(JournalScope::Issue(1), JSMITH)
            .await
            .unwrap()
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        f.oracle
            .add_permission(JSMITH, PROJECT, Permission::ViewPrivateNotes)
            .await;
        let ids: Vec<DbId> = f
            .gate()
            .list_visible(JournalScope::Project(PROJECT), JSMITH)
            .await
            .unwrap()
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec![1, 2, private.id]);
    }

    #[tokio::test]
    async fn list_of_unknown_issue_is_not_found() {
        let f = fixture().await;
        let result = f.gate().list_visible(JournalScope::Issue(99), JSMITH).await;
        assert_matches!(result, Err(CoreError::NotFound { entity: "Issue", id: 99 }));
    }

    #[tokio::test]
    async fn project_list_without_view_issues_is_forbidden() {
        let f = fixture().await;
        let result = f.gate().list_visible(JournalScope::Project(PROJECT), 42).await;
        assert_matches!(result, Err(CoreError::Forbidden(_)));
    }

    #[tokio::test]
    async fn private_journal_is_not_found_without_permission() {
        let f = fixture().await;
        let private = add_private_note(&f).await;

        let result = f.gate().get_if_visible(private.id, DLOPPER).await;
        assert_matches!(result, Err(CoreError::NotFound { entity: "Journal", .. }));

        let visible = f.gate().get_if_visible(private.id, JSMITH).await.unwrap();
        assert_eq!(visible.journal.notes, "Privates notes");
    }

    #[tokio::test]
    async fn admin_sees_private_journal() {
        let f = fixture().await;
        let private = add_private_note(&f).await;
        f.oracle.set_admin(ADMIN, true).await;
        assert!(f.gate().get_if_visible(private.id, ADMIN).await.is_ok());
    }

    #[tokio::test]
    async fn edit_of_hidden_journal_is_not_found_not_forbidden() {
        let f = fixture().await;
        let private = add_private_note(&f).await;
        // Can edit notes but cannot see private ones.
        f.oracle
            .grant(DLOPPER, PROJECT, &[Permission::ViewIssues, Permission::EditIssueNotes])
            .await;

        let result = f.gate().get_for_edit(private.id, DLOPPER).await;
        assert_matches!(result, Err(CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn edit_without_permission_is_forbidden() {
        let f = fixture().await;
        let result = f.gate().get_for_edit(1, DLOPPER).await;
        assert_matches!(result, Err(CoreError::Forbidden(_)));
    }

    #[tokio::test]
    async fn edit_own_notes_only_covers_own_journals() {
        let f = fixture().await;
        f.oracle
            .grant(
                DLOPPER,
                PROJECT,
                &[Permission::ViewIssues, Permission::EditOwnIssueNotes],
            )
            .await;
        let own = f
            .store
            .create_journal(&NewJournal {
                issue_id: 1,
                user_id: DLOPPER,
                notes: "Mine".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(f.gate().get_for_edit(own.id, DLOPPER).await.is_ok());
        assert_matches!(
            f.gate().get_for_edit(1, DLOPPER).await,
            Err(CoreError::Forbidden(_))
        );
    }

    #[tokio::test]
    async fn anonymous_reads_public_project_but_never_edits() {
        let f = fixture().await;
        let private = add_private_note(&f).await;
        f.oracle
            .grant(
                ANONYMOUS_USER_ID,
                PROJECT,
                &[Permission::ViewIssues, Permission::EditIssueNotes],
            )
            .await;

        let listed = f
            .gate()
            .list_visible(JournalScope::Issue(1), ANONYMOUS_USER_ID)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_matches!(
            f.gate().get_if_visible(private.id, ANONYMOUS_USER_ID).await,
            Err(CoreError::NotFound { .. })
        );
        assert_matches!(
            f.gate().get_for_edit(1, ANONYMOUS_USER_ID).await,
            Err(CoreError::Forbidden(_))
        );

        f.oracle.grant(ANONYMOUS_USER_ID, PROJECT, &[]).await;
        assert_matches!(
            f.gate()
                .list_visible(JournalScope::Project(PROJECT), ANONYMOUS_USER_ID)
                .await,
            Err(CoreError::Forbidden(_))
        );
    }

    #[tokio::test]
    async fn blank_notes_delete_the_journal() {
        let f = fixture().await;
        let before = f.store.count_journals().await.unwrap();

        let outcome = f.gate().update_notes(2, JSMITH, "", None).await.unwrap();
        assert_eq!(outcome, EditOutcome::Deleted(2));
        assert_eq!(f.store.count_journals().await.unwrap(), before - 1);
        assert!(f.store.find_journal(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn whitespace_notes_also_delete() {
        let f = fixture().await;
        let outcome = f.gate().update_notes(1, JSMITH, "  \n ", None).await.unwrap();
        assert_eq!(outcome, EditOutcome::Deleted(1));
    }

    #[tokio::test]
    async fn non_blank_notes_are_persisted_verbatim() {
        let f = fixture().await;
        let outcome = f
            .gate()
            .update_notes(2, JSMITH, "Updated notes", None)
            .await
            .unwrap();
        assert_matches!(outcome, EditOutcome::Updated(ref j) if j.notes == "Updated notes");
        assert_eq!(
            f.store.find_journal(2).await.unwrap().unwrap().notes,
            "Updated notes"
        );
    }

    #[tokio::test]
    async fn private_flag_requires_set_notes_private() {
        let f = fixture().await;
        f.oracle
            .grant(DLOPPER, PROJECT, &[Permission::ViewIssues, Permission::EditIssueNotes])
            .await;

        let outcome = f
            .gate()
            .update_notes(1, DLOPPER, "Still public", Some(true))
            .await
            .unwrap();
        assert_matches!(outcome, EditOutcome::Updated(ref j) if !j.private_notes);

        let outcome = f
            .gate()
            .update_notes(1, JSMITH, "Now private", Some(true))
            .await
            .unwrap();
        assert_matches!(outcome, EditOutcome::Updated(ref j) if j.private_notes);
    }

    #[tokio::test]
    async fn reply_to_issue_quotes_description() {
        let f = fixture().await;
        let reply = f.gate().reply_to_issue(1, JSMITH).await.unwrap();
        assert_eq!(reply.journal_id, None);
        assert_eq!(reply.content, "John Smith wrote:\n> Unable to print recipes\n\n");
    }

    #[tokio::test]
    async fn reply_to_journal_quotes_notes_with_indice() {
        let f = fixture().await;
        let reply = f.gate().reply_to_journal(2, JSMITH).await.unwrap();
        assert_eq!(reply.journal_id, Some(2));
        assert_eq!(
            reply.content,
            "John Smith wrote in #note-2:\n> Some notes with Redmine links: #2, r2.\n\n"
        );
    }

    #[tokio::test]
    async fn reply_without_add_notes_is_forbidden() {
        let f = fixture().await;
        assert_matches!(
            f.gate().reply_to_issue(1, DLOPPER).await,
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            f.gate().reply_to_journal(1, DLOPPER).await,
            Err(CoreError::Forbidden(_))
        );
    }

    #[tokio::test]
    async fn reply_to_hidden_private_note_is_not_found() {
        let f = fixture().await;
        let private = add_private_note(&f).await;
        f.oracle
            .remove_permission(JSMITH, PROJECT, Permission::ViewPrivateNotes)
            .await;
        assert_matches!(
            f.gate().reply_to_journal(private.id, JSMITH).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn create_note_checks_visibility_then_permission() {
        let f = fixture().await;
        assert_matches!(
            f.gate().create_note(1, 42, "hi", false).await,
            Err(CoreError::NotFound { .. })
        );
        assert_matches!(
            f.gate().create_note(1, DLOPPER, "hi", false).await,
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            f.gate().create_note(1, JSMITH, "   ", false).await,
            Err(CoreError::Validation(_))
        );

        let journal = f.gate().create_note(1, JSMITH, "New note", true).await.unwrap();
        assert_eq!(journal.notes, "New note");
        assert!(journal.private_notes);
    }

    #[tokio::test]
    async fn diff_of_description_detail() {
        let f = fixture().await;
        let journal = f.store.find_journal(2).await.unwrap().unwrap();
        let detail_id = journal.details[0].id;

        let diff = f.gate().diff_detail(2, detail_id, JSMITH).await.unwrap();
        assert_eq!(diff.prop_key, "description");
        assert!(diff
            .chunks
            .iter()
            .any(|c| c.status == crate::diff::DiffStatus::Added && c.text == "cookbooks"));
    }

    #[tokio::test]
    async fn diff_of_unknown_detail_is_not_found() {
        let f = fixture().await;
        assert_matches!(
            f.gate().diff_detail(2, 999, JSMITH).await,
            Err(CoreError::NotFound { entity: "JournalDetail", id: 999 })
        );
        assert_matches!(
            f.gate().diff_detail(1, 1, JSMITH).await,
            Err(CoreError::NotFound { entity: "JournalDetail", .. })
        );
    }

    #[test]
    fn filter_visible_orders_by_creation_then_id() {
        let now = chrono::Utc::now();
        let journal = |id: DbId, offset: i64| Journal {
            id,
            issue_id: 1,
            project_id: PROJECT,
            user_id: ADMIN,
            author_name: "a".into(),
            notes: String::new(),
            private_notes: false,
            details: Vec::new(),
            created_at: now + chrono::Duration::seconds(offset),
            updated_at: now,
        };
        let ctx = AuthContext::new(JSMITH, PROJECT, [Permission::ViewIssues].into_iter().collect());
        let ids: Vec<DbId> = filter_visible(vec![journal(3, 5), journal(2, 0), journal(1, 0)], &ctx)
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn context_of_other_project_sees_nothing() {
        let ctx = AuthContext::admin(ADMIN, 2);
        let j = Journal {
            id: 1,
            issue_id: 1,
            project_id: PROJECT,
            user_id: ADMIN,
            author_name: "a".into(),
            notes: "n".into(),
            private_notes: false,
            details: Vec::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert!(!can_view(&j, &ctx));
    }
}
