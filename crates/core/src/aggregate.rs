//! Phase/task aggregation: the ordered "phase -> tasks" structure the
//! timeline renders, plus derived per-project statistics.
//!
//! Inputs are explicit typed records mapped from storage rows at the API
//! boundary. The collections are flat and independently loaded; referential
//! integrity is NOT assumed (a task may carry a phase id that matches no
//! phase -- it is treated as unassigned).
//!
//! Everything here is a pure function of its inputs: re-running on unchanged
//! inputs yields structurally identical output.

use chrono::NaiveDate;
use serde::Serialize;

use crate::palette::{trade_color, UNASSIGNED_COLOR};
use crate::status::{STATUS_COMPLETED, STATUS_DELAYED, STATUS_IN_PROGRESS, STATUS_PLANNED};
use crate::types::{DbId, Timestamp};

/// Name of the synthetic trailing group collecting tasks without a phase.
pub const UNASSIGNED_GROUP_NAME: &str = "Unassigned Tasks";

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// A phase as the aggregator sees it.
#[derive(Debug, Clone)]
pub struct PhaseRecord {
    pub id: DbId,
    pub name: String,
    pub color: String,
    /// Display/layout sequence; dense 0..n-1 per project.
    pub position: i32,
}

/// A task as the aggregator sees it.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: DbId,
    pub name: String,
    /// Denormalized owning-project name; the aggregator filters on it.
    pub project_name: String,
    pub phase_id: Option<DbId>,
    pub trade: String,
    pub status: String,
    pub priority: String,
    pub progress: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Legacy single date, used when start/end are absent.
    pub due_date: Option<NaiveDate>,
}

/// A media attachment as carried on aggregated tasks.
#[derive(Debug, Clone, Serialize)]
pub struct MediaRecord {
    pub id: DbId,
    pub task_id: DbId,
    pub name: String,
    pub url: String,
    pub kind: String,
}

/// An immutable progress comment as carried on aggregated tasks.
#[derive(Debug, Clone, Serialize)]
pub struct CommentRecord {
    pub id: DbId,
    pub task_id: DbId,
    pub author_name: String,
    pub body: String,
    pub previous_progress: i32,
    pub new_progress: i32,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// An ordered group of tasks: a real phase, a synthetic trade group, or the
/// trailing "Unassigned Tasks" group.
#[derive(Debug, Clone, Serialize)]
pub struct TaskGroup {
    pub id: String,
    pub name: String,
    pub color: String,
    pub collapsed: bool,
    pub tasks: Vec<GroupedTask>,
}

/// A task inside a group, with resolved dates and attached media/comments.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedTask {
    pub id: DbId,
    pub name: String,
    pub phase_id: Option<DbId>,
    pub trade: String,
    pub status: String,
    pub priority: String,
    pub progress: i32,
    /// Resolved start, falling back to the legacy due date.
    pub start_date: Option<NaiveDate>,
    /// Resolved end, falling back to the legacy due date.
    pub end_date: Option<NaiveDate>,
    pub media: Vec<MediaRecord>,
    pub media_count: usize,
    pub comments: Vec<CommentRecord>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Build the ordered group list for one project.
///
/// With at least one phase: phases ascending by `position`, member tasks in
/// natural (load) order, and one trailing "Unassigned Tasks" group for tasks
/// whose phase id is null or matches no phase (emitted only when non-empty).
/// Empty phases are still emitted, to show structure.
///
/// With zero phases: tasks are grouped by their exact `trade` string; each
/// distinct trade becomes a synthetic group named after the trade, colored
/// from the cyclic palette by first-seen order.
pub fn build_task_groups(
    project_name: &str,
    phases: &[PhaseRecord],
    tasks: &[TaskRecord],
    media: &[MediaRecord],
    comments: &[CommentRecord],
) -> Vec<TaskGroup> {
    let project_tasks: Vec<&TaskRecord> = tasks
        .iter()
        .filter(|t| t.project_name == project_name)
        .collect();

    if phases.is_empty() {
        return trade_groups(&project_tasks, media, comments);
    }

    let mut ordered: Vec<&PhaseRecord> = phases.iter().collect();
    ordered.sort_by_key(|p| p.position);

    let mut groups: Vec<TaskGroup> = ordered
        .iter()
        .map(|phase| TaskGroup {
            id: format!("phase-{}", phase.id),
            name: phase.name.clone(),
            color: phase.color.clone(),
            collapsed: false,
            tasks: project_tasks
                .iter()
                .filter(|t| t.phase_id == Some(phase.id))
                .map(|t| resolve_task(t, media, comments))
                .collect(),
        })
        .collect();

    // Null phase ids and dangling references both count as unassigned.
    let unassigned: Vec<GroupedTask> = project_tasks
        .iter()
        .filter(|t| !matches!(t.phase_id, Some(id) if ordered.iter().any(|p| p.id == id)))
        .map(|t| resolve_task(t, media, comments))
        .collect();

    if !unassigned.is_empty() {
        groups.push(TaskGroup {
            id: "unassigned".to_string(),
            name: UNASSIGNED_GROUP_NAME.to_string(),
            color: UNASSIGNED_COLOR.to_string(),
            collapsed: false,
            tasks: unassigned,
        });
    }

    groups
}

/// Fallback grouping by exact trade string, first-seen order.
fn trade_groups(
    project_tasks: &[&TaskRecord],
    media: &[MediaRecord],
    comments: &[CommentRecord],
) -> Vec<TaskGroup> {
    let mut trades: Vec<&str> = Vec::new();
    for task in project_tasks {
        if !trades.contains(&task.trade.as_str()) {
            trades.push(&task.trade);
        }
    }

    trades
        .iter()
        .enumerate()
        .map(|(index, trade)| TaskGroup {
            id: format!("trade-{trade}"),
            name: (*trade).to_string(),
            color: trade_color(index).to_string(),
            collapsed: false,
            tasks: project_tasks
                .iter()
                .filter(|t| t.trade == *trade)
                .map(|t| resolve_task(t, media, comments))
                .collect(),
        })
        .collect()
}

/// Resolve one task: date fallback plus media/comment attachment.
fn resolve_task(
    task: &TaskRecord,
    media: &[MediaRecord],
    comments: &[CommentRecord],
) -> GroupedTask {
    let attached: Vec<MediaRecord> = media
        .iter()
        .filter(|m| m.task_id == task.id)
        .cloned()
        .collect();

    GroupedTask {
        id: task.id,
        name: task.name.clone(),
        phase_id: task.phase_id,
        trade: task.trade.clone(),
        status: task.status.clone(),
        priority: task.priority.clone(),
        progress: task.progress,
        start_date: task.start_date.or(task.due_date),
        end_date: task.end_date.or(task.due_date),
        media_count: attached.len(),
        media: attached,
        comments: comments
            .iter()
            .filter(|c| c.task_id == task.id)
            .cloned()
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Derived statistics
// ---------------------------------------------------------------------------

/// Per-project derived statistics: task count, mean progress, counts by
/// status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub task_count: usize,
    /// Mean task progress rounded to the nearest integer; 0 with no tasks.
    pub overall_progress: i32,
    pub planned: usize,
    pub in_progress: usize,
    pub delayed: usize,
    pub completed: usize,
}

/// Compute statistics over a project's tasks.
pub fn project_stats(tasks: &[TaskRecord]) -> ProjectStats {
    let count_status =
        |status: &str| tasks.iter().filter(|t| t.status == status).count();

    let overall_progress = if tasks.is_empty() {
        0
    } else {
        let sum: i64 = tasks.iter().map(|t| i64::from(t.progress)).sum();
        (sum as f64 / tasks.len() as f64).round() as i32
    };

    ProjectStats {
        task_count: tasks.len(),
        overall_progress,
        planned: count_status(STATUS_PLANNED),
        in_progress: count_status(STATUS_IN_PROGRESS),
        delayed: count_status(STATUS_DELAYED),
        completed: count_status(STATUS_COMPLETED),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
