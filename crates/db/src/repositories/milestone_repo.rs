//! Repository for the `milestones` table.

use sitetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::milestone::{CreateMilestone, Milestone, UpdateMilestone};

const COLUMNS: &str = "id, task_id, name, kind, date, created_at";

/// Provides CRUD operations for task milestones.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Attach a milestone to a task.
    pub async fn create(
        pool: &PgPool,
        task_id: DbId,
        input: &CreateMilestone,
    ) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestones (task_id, name, kind, date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(task_id)
            .bind(&input.name)
            .bind(input.kind.as_str())
            .bind(input.date)
            .fetch_one(pool)
            .await
    }

    /// Find a milestone by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE id = $1");
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a task's milestones by date.
    pub async fn list_by_task(pool: &PgPool, task_id: DbId) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE task_id = $1 ORDER BY date, id");
        sqlx::query_as::<_, Milestone>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// List every milestone on a project's tasks (for the timeline payload).
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!(
            "SELECT m.id, m.task_id, m.name, m.kind, m.date, m.created_at
             FROM milestones m
             JOIN tasks t ON t.id = m.task_id
             WHERE t.project_id = $1
             ORDER BY m.date, m.id"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a milestone. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMilestone,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET
                name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                date = COALESCE($4, date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.kind.map(|k| k.as_str()))
            .bind(input.date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a milestone. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
