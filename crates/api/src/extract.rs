//! Body and query extractors whose rejections use the [`AppError`] envelope.

use axum::extract::{FromRequest, FromRequestParts, Query};

use crate::error::AppError;

/// `axum::Json` with a `{error, code}` rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` with a `{error, code}` rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
