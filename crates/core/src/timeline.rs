//! Timeline layout engine: converts a project's date span and a fixed
//! pixels-per-day unit into absolute grid geometry for the date header,
//! task bars, and milestone markers.
//!
//! All date arithmetic is pure calendar-day stepping on `NaiveDate`; there
//! is no timezone-aware skipping. Out-of-range and inverted spans are not
//! errors: geometry degenerates gracefully and clipped-to-nothing bars get
//! a minimum-visible-width floor of one day column. Milestone markers are
//! deliberately NOT clipped; one outside the visible range renders off-grid.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{GroupedTask, TaskGroup};
use crate::types::DbId;

/// Default pixels per day column.
pub const DEFAULT_DAY_WIDTH: i64 = 40;

/// Rendered size of a milestone marker, in pixels. Marker offsets subtract
/// half of this to center the glyph.
pub const MILESTONE_MARKER_SIZE: i64 = 12;

/// Layout configuration; fixed per call, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct TimelineConfig {
    pub day_width: i64,
    pub marker_size: i64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            day_width: DEFAULT_DAY_WIDTH,
            marker_size: MILESTONE_MARKER_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Number of day columns spanned by [start, end], both endpoint days
/// included. An inverted range yields 0: a degenerate empty grid, which is a
/// boundary case rather than an error.
pub fn total_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        0
    } else {
        (end - start).num_days() + 1
    }
}

/// The date header: exactly `total` entries starting at `start`, each one
/// calendar day after the previous.
pub fn date_grid(start: NaiveDate, total: i64) -> Vec<NaiveDate> {
    (0..total)
        .map(|offset| start + chrono::Duration::days(offset))
        .collect()
}

// ---------------------------------------------------------------------------
// Task bars
// ---------------------------------------------------------------------------

/// Pixel rectangle for one task bar, clipped to the project window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskBar {
    pub offset_start_days: i64,
    pub duration_days: i64,
    pub left: i64,
    pub width: i64,
}

/// Compute a task's bar geometry inside a grid of `total` day columns.
///
/// The start offset clips tasks that begin before the project window; the
/// end offset clips tasks that run past it. A duration of zero or less
/// (degenerate, inverted, or clipped-to-nothing span) renders at exactly one
/// `day_width` -- the minimum-visible-width floor -- never at zero.
pub fn task_bar(
    project_start: NaiveDate,
    total: i64,
    task_start: NaiveDate,
    task_end: NaiveDate,
    config: &TimelineConfig,
) -> TaskBar {
    let offset_start_days = (task_start - project_start).num_days().max(0);
    let offset_end_days = (task_end - project_start).num_days().min(total);
    let duration_days = offset_end_days - offset_start_days;

    TaskBar {
        offset_start_days,
        duration_days,
        left: offset_start_days * config.day_width,
        width: (duration_days * config.day_width).max(config.day_width),
    }
}

/// Width of the nested progress fill inside a bar: purely visual, derived
/// from the task's 0..=100 progress percentage.
pub fn progress_fill_width(progress: i32, bar_width: i64) -> f64 {
    f64::from(progress) * bar_width as f64 / 100.0
}

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

/// A milestone as the layout engine sees it.
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneRecord {
    pub id: DbId,
    pub task_id: DbId,
    pub name: String,
    pub kind: String,
    pub date: NaiveDate,
}

/// A milestone with its resolved horizontal offset.
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneMarker {
    pub id: DbId,
    pub name: String,
    pub kind: String,
    pub date: NaiveDate,
    pub offset: i64,
}

/// Horizontal offset of a milestone marker: its day-column position minus
/// half the marker's rendered size. No clipping is applied.
pub fn milestone_offset(
    project_start: NaiveDate,
    date: NaiveDate,
    config: &TimelineConfig,
) -> i64 {
    (date - project_start).num_days() * config.day_width - config.marker_size / 2
}

// ---------------------------------------------------------------------------
// Composed layout
// ---------------------------------------------------------------------------

/// One aggregated group with per-task geometry attached.
#[derive(Debug, Clone, Serialize)]
pub struct GroupLayout {
    pub id: String,
    pub name: String,
    pub color: String,
    pub collapsed: bool,
    pub tasks: Vec<TaskLayout>,
}

/// One task with its bar, progress fill, and milestone markers.
///
/// A task with no resolvable dates has no bar (date validation belongs to
/// the data-entry boundary; there is nothing to position here).
#[derive(Debug, Clone, Serialize)]
pub struct TaskLayout {
    pub task: GroupedTask,
    pub bar: Option<TaskBar>,
    pub progress_width: f64,
    pub milestones: Vec<MilestoneMarker>,
}

/// The full timeline payload: date header plus positioned groups.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineLayout {
    pub total_days: i64,
    pub chart_width: i64,
    pub days: Vec<NaiveDate>,
    pub groups: Vec<GroupLayout>,
}

/// Lay out aggregated groups over the project's date span.
pub fn layout_timeline(
    project_start: NaiveDate,
    project_end: NaiveDate,
    groups: Vec<TaskGroup>,
    milestones: &[MilestoneRecord],
    config: &TimelineConfig,
) -> TimelineLayout {
    let total = total_days(project_start, project_end);

    let groups = groups
        .into_iter()
        .map(|group| GroupLayout {
            id: group.id,
            name: group.name,
            color: group.color,
            collapsed: group.collapsed,
            tasks: group
                .tasks
                .into_iter()
                .map(|task| layout_task(project_start, total, task, milestones, config))
                .collect(),
        })
        .collect();

    TimelineLayout {
        total_days: total,
        chart_width: total * config.day_width,
        days: date_grid(project_start, total),
        groups,
    }
}

fn layout_task(
    project_start: NaiveDate,
    total: i64,
    task: GroupedTask,
    milestones: &[MilestoneRecord],
    config: &TimelineConfig,
) -> TaskLayout {
    let bar = match (task.start_date, task.end_date) {
        (Some(start), Some(end)) => Some(task_bar(project_start, total, start, end, config)),
        _ => None,
    };

    let progress_width = bar
        .as_ref()
        .map(|b| progress_fill_width(task.progress, b.width))
        .unwrap_or(0.0);

    let markers = milestones
        .iter()
        .filter(|m| m.task_id == task.id)
        .map(|m| MilestoneMarker {
            id: m.id,
            name: m.name.clone(),
            kind: m.kind.clone(),
            date: m.date,
            offset: milestone_offset(project_start, m.date, config),
        })
        .collect();

    TaskLayout {
        task,
        bar,
        progress_width,
        milestones: markers,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
