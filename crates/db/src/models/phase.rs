//! Phase entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sitetrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A phase row from the `phases` table.
///
/// `position` is the display/layout sequence, kept dense 0..n-1 per project
/// by [`crate::repositories::PhaseRepo`] on every reorder and delete.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Phase {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub color: String,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new phase. The position is assigned by the repository
/// (appended after the project's current last phase).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhase {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Defaults to the standard phase color if omitted.
    pub color: Option<String>,
}

/// DTO for updating an existing phase. All fields are optional; position
/// changes go through the dedicated reorder operation instead.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePhase {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub color: Option<String>,
}
