//! Media attachment model and DTOs.

use serde::{Deserialize, Serialize};
use sitetrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::status::MediaKind;

/// A row from the `media_files` table.
///
/// `url` is an opaque pointer into external file storage; upload and
/// durability are that collaborator's contract, not this layer's.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaFile {
    pub id: DbId,
    pub task_id: DbId,
    pub name: String,
    pub url: String,
    #[sqlx(try_from = "String")]
    pub kind: MediaKind,
    pub uploader_id: DbId,
    /// Denormalized display name of the uploader at the time of upload.
    pub uploader_name: String,
    pub description: Option<String>,
    pub uploaded_at: Timestamp,
}

/// DTO for attaching a media file to a task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMediaFile {
    pub name: String,
    pub url: String,
    pub kind: MediaKind,
    pub description: Option<String>,
}

/// DTO for editing a media file. Only name and description are mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMediaFile {
    pub name: Option<String>,
    pub description: Option<String>,
}
