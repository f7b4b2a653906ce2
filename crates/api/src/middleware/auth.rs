//! JWT-based authentication extractors for Axum handlers.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use issuelog_core::error::CoreError;
use issuelog_core::permissions::ANONYMOUS_USER_ID;
use issuelog_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Carries identity only; what the user may do is decided per project by the
/// journal gate.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Validate an `Authorization` header value.
fn authenticate(auth_header: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    Ok(AuthUser {
        user_id: claims.sub,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        authenticate(auth_header, state)
    }
}

/// `Option<AuthUser>`: `None` without an `Authorization` header. A header
/// that is present but invalid is still rejected.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        match parts.headers.get(AUTHORIZATION) {
            None => Ok(None),
            Some(value) => {
                let auth_header = value
                    .to_str()
                    .map_err(|_| unauthorized("Malformed Authorization header"))?;
                authenticate(auth_header, state).map(Some)
            }
        }
    }
}

/// Caller of a read-only endpoint: an authenticated user or an anonymous one.
///
/// Anonymous callers act as [`ANONYMOUS_USER_ID`], whose permissions come
/// from the anonymous grant of public projects.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub user_id: DbId,
}

impl Viewer {
    pub fn is_anonymous(&self) -> bool {
        self.user_id == ANONYMOUS_USER_ID
    }

    /// Map a gate error for this caller. A denied anonymous caller is asked
    /// to authenticate (401) instead of getting 403.
    pub fn reject(&self, err: CoreError) -> AppError {
        match err {
            CoreError::Forbidden(_) if self.is_anonymous() => {
                unauthorized("Authentication required")
            }
            other => AppError::Core(other),
        }
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth =
            <AuthUser as OptionalFromRequestParts<AppState>>::from_request_parts(parts, state)
                .await?;
        Ok(Viewer {
            user_id: auth.map_or(ANONYMOUS_USER_ID, |a| a.user_id),
        })
    }
}
