//! Repository for the `media_files` table.

use sitetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::media_file::{CreateMediaFile, MediaFile, UpdateMediaFile};

const COLUMNS: &str =
    "id, task_id, name, url, kind, uploader_id, uploader_name, description, uploaded_at";

/// Provides CRUD operations for media attachments.
pub struct MediaRepo;

impl MediaRepo {
    /// Attach a media file to a task, denormalizing the uploader's display
    /// name.
    pub async fn create(
        pool: &PgPool,
        task_id: DbId,
        uploader_id: DbId,
        uploader_name: &str,
        input: &CreateMediaFile,
    ) -> Result<MediaFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_files (task_id, name, url, kind, uploader_id, uploader_name, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(task_id)
            .bind(&input.name)
            .bind(&input.url)
            .bind(input.kind.as_str())
            .bind(uploader_id)
            .bind(uploader_name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a media file by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_files WHERE id = $1");
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a task's media, newest-first.
    pub async fn list_by_task(pool: &PgPool, task_id: DbId) -> Result<Vec<MediaFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_files WHERE task_id = $1 ORDER BY uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// List every media file on a project's tasks (for the timeline payload).
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MediaFile>, sqlx::Error> {
        let query = format!(
            "SELECT m.id, m.task_id, m.name, m.url, m.kind, m.uploader_id, m.uploader_name,
                    m.description, m.uploaded_at
             FROM media_files m
             JOIN tasks t ON t.id = m.task_id
             WHERE t.project_id = $1
             ORDER BY m.uploaded_at DESC, m.id DESC"
        );
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Edit a media file's name/description. Only non-`None` fields are
    /// applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMediaFile,
    ) -> Result<Option<MediaFile>, sqlx::Error> {
        let query = format!(
            "UPDATE media_files SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a media file. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
