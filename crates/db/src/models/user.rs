//! User entity model and DTOs.

use issuelog_core::journal::display_name;
use issuelog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub login: String,
    pub firstname: String,
    pub lastname: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn name(&self) -> String {
        display_name(&self.firstname, &self.lastname, &self.login)
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub login: String,
    pub firstname: String,
    pub lastname: String,
    pub is_admin: bool,
}
