//! Role and membership models.

use issuelog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Built-in role granting what anonymous callers may do on public projects.
pub const ANONYMOUS_ROLE: &str = "Anonymous";

/// A row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub permissions: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub role_id: DbId,
    pub created_at: Timestamp,
}
