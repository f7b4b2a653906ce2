//! Request handlers.
//!
//! Handlers resolve the caller via [`crate::middleware::auth::AuthUser`],
//! delegate to the journal gate and map errors via [`crate::error::AppError`].

pub mod journals;
