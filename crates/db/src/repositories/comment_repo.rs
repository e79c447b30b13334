//! Repository for the `progress_comments` table.
//!
//! Comments are append-only and are inserted exclusively by
//! [`crate::repositories::TaskRepo::update_progress`]; this repository only
//! reads them back.

use sitetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress_comment::ProgressComment;

const COLUMNS: &str =
    "id, task_id, author_id, author_name, body, previous_progress, new_progress, created_at";

/// Read access to a task's progress history.
pub struct CommentRepo;

impl CommentRepo {
    /// List a task's comments oldest-first.
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<ProgressComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progress_comments WHERE task_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ProgressComment>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// List every comment on a project's tasks (for the timeline payload),
    /// oldest-first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProgressComment>, sqlx::Error> {
        let query = format!(
            "SELECT c.id, c.task_id, c.author_id, c.author_name, c.body,
                    c.previous_progress, c.new_progress, c.created_at
             FROM progress_comments c
             JOIN tasks t ON t.id = c.task_id
             WHERE t.project_id = $1
             ORDER BY c.created_at, c.id"
        );
        sqlx::query_as::<_, ProgressComment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
