//! Route definitions for journals.

use axum::routing::get;
use axum::Router;

use crate::handlers::journals;
use crate::state::AppState;

/// Issue-scoped journal routes, nested under `/issues`.
///
/// ```text
/// GET    /{id}/journals                      list_issue_journals
/// POST   /{id}/journals                      create_issue_note
/// GET    /{id}/reply                         reply_to_issue
/// ```
pub fn issue_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/journals",
            get(journals::list_issue_journals).post(journals::create_issue_note),
        )
        .route("/{id}/reply", get(journals::reply_to_issue))
}

/// Project-scoped journal routes, nested under `/projects`.
///
/// ```text
/// GET    /{id}/journals                      list_project_journals
/// ```
pub fn project_router() -> Router<AppState> {
    Router::new().route("/{id}/journals", get(journals::list_project_journals))
}

/// Single-journal routes, nested under `/journals`.
///
/// ```text
/// GET    /{id}                               show_journal
/// PUT    /{id}                               update_journal
/// GET    /{id}/reply                         reply_to_journal
/// GET    /{id}/edit                          edit_form
/// GET    /{id}/diff/{detail_id}              diff_detail
/// ```
pub fn journal_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(journals::show_journal).put(journals::update_journal),
        )
        .route("/{id}/reply", get(journals::reply_to_journal))
        .route("/{id}/edit", get(journals::edit_form))
        .route("/{id}/diff/{detail_id}", get(journals::diff_detail))
}
