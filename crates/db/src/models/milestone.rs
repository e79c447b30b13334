//! Milestone entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sitetrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::status::MilestoneKind;

/// A milestone row from the `milestones` table: a dated, typed marker
/// attached to a task, independent of the task's own date range.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Milestone {
    pub id: DbId,
    pub task_id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub kind: MilestoneKind,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}

/// DTO for creating a new milestone under a task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMilestone {
    pub name: String,
    pub kind: MilestoneKind,
    pub date: NaiveDate,
}

/// DTO for updating an existing milestone. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMilestone {
    pub name: Option<String>,
    pub kind: Option<MilestoneKind>,
    pub date: Option<NaiveDate>,
}
