//! Task entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sitetrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::status::{Priority, WorkStatus};

/// A task row from the `tasks` table.
///
/// `project_name` is denormalized alongside the foreign key; the timeline
/// aggregation filters on it. `phase_id` is nullable -- a null means the
/// task is unassigned and renders in the trailing "Unassigned Tasks" group.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub project_name: String,
    pub phase_id: Option<DbId>,
    pub name: String,
    /// Free-text category (e.g. "Electrical"); the fallback grouping key for
    /// projects without phases.
    pub trade: String,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    #[sqlx(try_from = "String")]
    pub status: WorkStatus,
    pub progress: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Legacy single date, used as start/end fallback.
    pub due_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task under a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub name: String,
    pub trade: String,
    /// Defaults to medium if omitted.
    pub priority: Option<Priority>,
    /// Defaults to planned if omitted.
    pub status: Option<WorkStatus>,
    /// Defaults to 0 if omitted.
    pub progress: Option<i32>,
    pub phase_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

/// DTO for the general task edit. All fields are optional. Status and
/// progress are applied independently -- this path can leave them
/// inconsistent (e.g. completed at 40%), which is accepted behaviour; only
/// the dedicated progress-update operation derives status from progress.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub name: Option<String>,
    pub trade: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<WorkStatus>,
    pub progress: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}
