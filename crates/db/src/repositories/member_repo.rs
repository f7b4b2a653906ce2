//! Repository for the `members` table.

use issuelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Member;

const COLUMNS: &str = "id, user_id, project_id, role_id, created_at";

pub struct MemberRepo;

impl MemberRepo {
    /// Give `user_id` the role `role_id` on `project_id`.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
        role_id: DbId,
    ) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (user_id, project_id, role_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(role_id)
            .fetch_one(pool)
            .await
    }
}
