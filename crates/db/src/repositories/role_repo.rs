//! Repository for the `roles` table.

use issuelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::{Role, ANONYMOUS_ROLE};

const COLUMNS: &str = "id, name, permissions, created_at, updated_at";

/// Provides read and permission-editing operations for roles.
pub struct RoleRepo;

impl RoleRepo {
    pub async fn create(
        pool: &PgPool,
        name: &str,
        permissions: &[&str],
    ) -> Result<Role, sqlx::Error> {
        let query = format!(
            "INSERT INTO roles (name, permissions)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .bind(permissions)
            .fetch_one(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Grant a permission to a role. No-op if already granted.
    pub async fn add_permission(
        pool: &PgPool,
        role_id: DbId,
        permission: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE roles SET permissions = array_append(permissions, $1), updated_at = now()
             WHERE id = $2 AND NOT ($1 = ANY(permissions))",
        )
        .bind(permission)
        .bind(role_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Revoke a permission from a role.
    pub async fn remove_permission(
        pool: &PgPool,
        role_id: DbId,
        permission: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE roles SET permissions = array_remove(permissions, $1), updated_at = now()
             WHERE id = $2",
        )
        .bind(permission)
        .bind(role_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Distinct permission names a user holds on a project through memberships.
    pub async fn permissions_for(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT unnest(r.permissions)
             FROM members m
             JOIN roles r ON r.id = m.role_id
             WHERE m.user_id = $1 AND m.project_id = $2",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(p,)| p).collect())
    }

    /// Permission names of the `Anonymous` role when the project is public;
    /// empty for private or unknown projects.
    pub async fn anonymous_permissions_for(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT unnest(r.permissions)
             FROM roles r
             JOIN projects p ON p.id = $1 AND p.is_public
             WHERE r.name = $2",
        )
        .bind(project_id)
        .bind(ANONYMOUS_ROLE)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(p,)| p).collect())
    }
}
