//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::Viewer`] -- The caller of a read-only endpoint, anonymous without a token.

pub mod auth;
