//! Project entity model and DTOs.

use issuelog_core::journal::Project as DomainProject;
use issuelog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub identifier: String,
    pub name: String,
    /// Readable by anonymous callers through the `Anonymous` role.
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Project> for DomainProject {
    fn from(row: Project) -> Self {
        Self {
            id: row.id,
            identifier: row.identifier,
            name: row.name,
        }
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub identifier: String,
    pub name: String,
    pub is_public: bool,
}
