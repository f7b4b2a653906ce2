//! Handlers for issue journals: listings, replies, note edits and diffs.
//!
//! Every decision about what a user may see or change is delegated to
//! [`issuelog_core::gate::JournalGate`]; handlers only shape requests and
//! responses.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use issuelog_core::error::CoreError;
use issuelog_core::gate::{EditOutcome, JournalScope};
use issuelog_core::journal::Journal;
use issuelog_core::permissions::Permission;
use issuelog_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::feed::{self, ATOM_CONTENT_TYPE};
use crate::middleware::auth::{AuthUser, Viewer};
use crate::query::{FormatParams, ResponseFormat};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response bodies
-------------------------------------------------------------------------- */

/// Body of `POST /issues/{id}/journals`.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub notes: String,
    #[serde(default)]
    pub private_notes: bool,
}

/// Body of `PUT /journals/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateJournalRequest {
    pub notes: String,
    pub private_notes: Option<bool>,
}

/// Payload backing the note edit form.
#[derive(Debug, Serialize)]
pub struct EditForm {
    pub id: DbId,
    pub notes: String,
    pub private_notes: bool,
    pub can_set_private: bool,
}

/// Result of `PUT /journals/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateResult {
    pub id: DbId,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_notes: Option<bool>,
}

impl From<EditOutcome> for UpdateResult {
    fn from(outcome: EditOutcome) -> Self {
        match outcome {
            EditOutcome::Deleted(id) => Self {
                id,
                deleted: true,
                notes: None,
                private_notes: None,
            },
            EditOutcome::Updated(journal) => Self {
                id: journal.id,
                deleted: false,
                notes: Some(journal.notes),
                private_notes: Some(journal.private_notes),
            },
        }
    }
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Subjects of the issues referenced by `journals`, keyed by issue id.
async fn issue_subjects(
    state: &AppState,
    journals: &[Journal],
) -> AppResult<HashMap<DbId, String>> {
    let mut subjects = HashMap::new();
    for journal in journals {
        if subjects.contains_key(&journal.issue_id) {
            continue;
        }
        if let Some(issue) = state
            .journals
            .find_issue(journal.issue_id)
            .await
            .map_err(CoreError::from)?
        {
            subjects.insert(issue.id, issue.subject);
        }
    }
    Ok(subjects)
}

/// Render `journals` as JSON or as an Atom feed titled `scope_name`.
async fn render_listing(
    state: &AppState,
    format: ResponseFormat,
    journals: Vec<Journal>,
    scope_name: &str,
    feed_path: &str,
) -> AppResult<Response> {
    match format {
        ResponseFormat::Json => Ok(Json(DataResponse { data: journals }).into_response()),
        ResponseFormat::Atom => {
            let config = &state.config;
            let subjects = issue_subjects(state, &journals).await?;
            let entries = feed::journal_entries(&journals, &subjects, &config.public_url);
            let title = format!("{}: {scope_name}", config.app_title);
            let feed_url = format!("{}{feed_path}", config.public_url);
            let xml = feed::render(&title, &feed_url, &entries)
                .map_err(|e| CoreError::Internal(format!("Atom rendering failed: {e}")))?;
            Ok(([(CONTENT_TYPE, ATOM_CONTENT_TYPE)], xml).into_response())
        }
    }
}

/* --------------------------------------------------------------------------
Listings
-------------------------------------------------------------------------- */

/// GET /issues/{id}/journals
///
/// Journals of an issue visible to the caller, oldest first. Anonymous
/// callers see public projects only.
pub async fn list_issue_journals(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(issue_id): Path<DbId>,
    AppQuery(params): AppQuery<FormatParams>,
) -> AppResult<Response> {
    let gate = state.gate();
    let journals = gate
        .list_visible(JournalScope::Issue(issue_id), viewer.user_id)
        .await
        .map_err(|e| viewer.reject(e))?;

    render_listing(
        &state,
        params.format,
        journals,
        &format!("Issue #{issue_id}"),
        &format!("/api/v1/issues/{issue_id}/journals?format=atom"),
    )
    .await
}

/// GET /projects/{id}/journals
///
/// Journals of every issue of a project visible to the caller.
pub async fn list_project_journals(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    AppQuery(params): AppQuery<FormatParams>,
) -> AppResult<Response> {
    let gate = state.gate();
    let journals = gate
        .list_visible(JournalScope::Project(project_id), viewer.user_id)
        .await
        .map_err(|e| viewer.reject(e))?;

    let scope_name = match params.format {
        ResponseFormat::Atom => state
            .journals
            .find_project(project_id)
            .await
            .map_err(CoreError::from)?
            .map_or_else(|| format!("Project #{project_id}"), |p| p.name),
        ResponseFormat::Json => String::new(),
    };

    render_listing(
        &state,
        params.format,
        journals,
        &scope_name,
        &format!("/api/v1/projects/{project_id}/journals?format=atom"),
    )
    .await
}

/* --------------------------------------------------------------------------
Single journal
-------------------------------------------------------------------------- */

/// GET /journals/{id}
pub async fn show_journal(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(journal_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let visible = state
        .gate()
        .get_if_visible(journal_id, viewer.user_id)
        .await
        .map_err(|e| viewer.reject(e))?;
    Ok(Json(DataResponse {
        data: visible.journal,
    }))
}

/// GET /journals/{id}/edit
///
/// Current notes of an editable journal and whether the private flag may be
/// changed.
pub async fn edit_form(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(journal_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let visible = state.gate().get_for_edit(journal_id, auth.user_id).await?;
    let can_set_private = visible.ctx.allows(Permission::SetNotesPrivate);

    Ok(Json(DataResponse {
        data: EditForm {
            id: visible.journal.id,
            notes: visible.journal.notes,
            private_notes: visible.journal.private_notes,
            can_set_private,
        },
    }))
}

/// PUT /journals/{id}
///
/// Replace the notes of a journal. Blank notes delete the journal.
pub async fn update_journal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(journal_id): Path<DbId>,
    AppJson(input): AppJson<UpdateJournalRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = state
        .gate()
        .update_notes(journal_id, auth.user_id, &input.notes, input.private_notes)
        .await?;

    match &outcome {
        EditOutcome::Deleted(id) => {
            tracing::info!(user_id = auth.user_id, journal_id = *id, "Journal deleted");
        }
        EditOutcome::Updated(journal) => {
            tracing::info!(
                user_id = auth.user_id,
                journal_id = journal.id,
                private_notes = journal.private_notes,
                "Journal notes updated"
            );
        }
    }

    Ok(Json(DataResponse {
        data: UpdateResult::from(outcome),
    }))
}

/// GET /journals/{id}/diff/{detail_id}
pub async fn diff_detail(
    viewer: Viewer,
    State(state): State<AppState>,
    Path((journal_id, detail_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let diff = state
        .gate()
        .diff_detail(journal_id, detail_id, viewer.user_id)
        .await
        .map_err(|e| viewer.reject(e))?;
    Ok(Json(DataResponse { data: diff }))
}

/* --------------------------------------------------------------------------
Replies and new notes
-------------------------------------------------------------------------- */

/// GET /issues/{id}/reply
///
/// Quoted issue description to pre-fill a new note.
pub async fn reply_to_issue(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(issue_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reply = state.gate().reply_to_issue(issue_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: reply }))
}

/// GET /journals/{id}/reply
///
/// Quoted journal notes to pre-fill a new note.
pub async fn reply_to_journal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(journal_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reply = state
        .gate()
        .reply_to_journal(journal_id, auth.user_id)
        .await?;
    Ok(Json(DataResponse { data: reply }))
}

/// POST /issues/{id}/journals
///
/// Add a note to an issue.
pub async fn create_issue_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(issue_id): Path<DbId>,
    AppJson(input): AppJson<CreateNoteRequest>,
) -> AppResult<impl IntoResponse> {
    let journal = state
        .gate()
        .create_note(issue_id, auth.user_id, &input.notes, input.private_notes)
        .await?;

    tracing::info!(
        user_id = auth.user_id,
        issue_id = issue_id,
        journal_id = journal.id,
        "Journal note created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: journal })))
}
