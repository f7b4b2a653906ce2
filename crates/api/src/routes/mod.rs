pub mod health;
pub mod journals;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /issues/{id}/journals                      list (json | atom), add note
/// /issues/{id}/reply                         quote the issue description
///
/// /projects/{id}/journals                    list (json | atom)
///
/// /journals/{id}                             show, update notes
/// /journals/{id}/reply                       quote the journal notes
/// /journals/{id}/edit                        edit form data
/// /journals/{id}/diff/{detail_id}            word diff of a description change
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/issues", journals::issue_router())
        .nest("/projects", journals::project_router())
        .nest("/journals", journals::journal_router())
}
