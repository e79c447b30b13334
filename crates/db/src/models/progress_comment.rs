//! Progress comment model.
//!
//! Rows are append-only: every progress update inserts exactly one comment
//! capturing the before/after percentages and the acting user, and no
//! update or delete path exists.

use serde::Serialize;
use sitetrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `progress_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressComment {
    pub id: DbId,
    pub task_id: DbId,
    pub author_id: DbId,
    /// Denormalized display name of the author at the time of writing.
    pub author_name: String,
    pub body: String,
    pub previous_progress: i32,
    pub new_progress: i32,
    pub created_at: Timestamp,
}
