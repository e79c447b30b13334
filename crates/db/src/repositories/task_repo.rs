//! Repository for the `tasks` table.

use sitetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress_comment::ProgressComment;
use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, project_name, phase_id, name, trade, priority, status, \
     progress, start_date, end_date, due_date, created_at, updated_at";

const COMMENT_COLUMNS: &str =
    "id, task_id, author_id, author_name, body, previous_progress, new_progress, created_at";

/// Provides CRUD, phase-assignment, and progress-update operations for
/// tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task under a project, denormalizing the project name.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        project_name: &str,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, project_name, phase_id, name, trade, priority,
                                status, progress, start_date, end_date, due_date)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'medium'), COALESCE($7, 'planned'),
                     COALESCE($8, 0), $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(project_name)
            .bind(input.phase_id)
            .bind(&input.name)
            .bind(&input.trade)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.progress)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tasks in natural (load) order.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// General edit: only non-`None` fields in `input` are applied. Status
    /// and progress are written independently here, with no derivation
    /// between them.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                name = COALESCE($2, name),
                trade = COALESCE($3, trade),
                priority = COALESCE($4, priority),
                status = COALESCE($5, status),
                progress = COALESCE($6, progress),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                due_date = COALESCE($9, due_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.trade)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.progress)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Move a task into a phase, or back to unassigned with `None`. The
    /// value is written verbatim (unlike the COALESCE update above, this can
    /// clear the column).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_phase(
        pool: &PgPool,
        id: DbId,
        phase_id: Option<DbId>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET phase_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(phase_id)
            .fetch_optional(pool)
            .await
    }

    /// The dedicated progress-update operation: set progress and the status
    /// derived from it, and append the mandatory progress comment capturing
    /// the before/after values -- one transaction, so the history can never
    /// diverge from the task row.
    ///
    /// Returns `None` if no task with the given `id` exists.
    pub async fn update_progress(
        pool: &PgPool,
        id: DbId,
        new_progress: i32,
        derived_status: &str,
        author_id: DbId,
        author_name: &str,
        comment_body: &str,
    ) -> Result<Option<(Task, ProgressComment)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<(i32,)> =
            sqlx::query_as("SELECT progress FROM tasks WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((previous_progress,)) = previous else {
            tx.rollback().await?;
            return Ok(None);
        };

        let task_query = format!(
            "UPDATE tasks SET progress = $2, status = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&task_query)
            .bind(id)
            .bind(new_progress)
            .bind(derived_status)
            .fetch_one(&mut *tx)
            .await?;

        let comment_query = format!(
            "INSERT INTO progress_comments
                (task_id, author_id, author_name, body, previous_progress, new_progress)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COMMENT_COLUMNS}"
        );
        let comment = sqlx::query_as::<_, ProgressComment>(&comment_query)
            .bind(id)
            .bind(author_id)
            .bind(author_name)
            .bind(comment_body)
            .bind(previous_progress)
            .bind(new_progress)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((task, comment)))
    }

    /// Delete a task (comments, milestones, and media cascade). Returns
    /// `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
