//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sitetrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::status::WorkStatus;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: WorkStatus,
    /// Manually set or derived; 0..=100.
    pub progress: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Defaults to planned if omitted.
    pub status: Option<WorkStatus>,
    /// Defaults to 0 if omitted.
    pub progress: Option<i32>,
}

/// DTO for updating an existing project. All fields are optional; status and
/// progress are set independently here, with no reconciliation between them.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<WorkStatus>,
    pub progress: Option<i32>,
}
