//! Repository for the `project_assignments` table.

use sitetrack_core::types::DbId;
use sqlx::PgPool;

/// Client project visibility bookkeeping.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Whether the user is assigned to the project.
    pub async fn is_assigned(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM project_assignments
                            WHERE user_id = $1 AND project_id = $2)",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// The ids of the projects assigned to a user.
    pub async fn list_project_ids(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT project_id FROM project_assignments WHERE user_id = $1 ORDER BY project_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Replace a user's assignment list wholesale, in one transaction.
    pub async fn replace_for_user(
        pool: &PgPool,
        user_id: DbId,
        project_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM project_assignments WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        for project_id in project_ids {
            sqlx::query("INSERT INTO project_assignments (user_id, project_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(project_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await
    }
}
