//! Repository for the `projects` table.

use issuelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project};

const COLUMNS: &str = "id, identifier, name, is_public, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (identifier, name, is_public)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.identifier)
            .bind(&input.name)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Open or close a project to anonymous readers.
    pub async fn set_public(pool: &PgPool, id: DbId, is_public: bool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE projects SET is_public = $1, updated_at = now() WHERE id = $2")
            .bind(is_public)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
