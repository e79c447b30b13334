//! The timeline endpoint: aggregation of phases/tasks/media/comments into
//! ordered groups, then pixel layout over the project's date span.
//!
//! This is the adapter seam between storage rows and the core's typed
//! records: everything below `sitetrack_core` stays storage-agnostic.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sitetrack_core::aggregate::{
    build_task_groups, CommentRecord, MediaRecord, PhaseRecord, TaskRecord,
};
use sitetrack_core::error::CoreError;
use sitetrack_core::timeline::{
    layout_timeline, MilestoneRecord, TimelineConfig, TimelineLayout, DEFAULT_DAY_WIDTH,
};
use sitetrack_core::types::DbId;
use sitetrack_db::models::media_file::MediaFile;
use sitetrack_db::models::milestone::Milestone;
use sitetrack_db::models::phase::Phase;
use sitetrack_db::models::progress_comment::ProgressComment;
use sitetrack_db::models::project::Project;
use sitetrack_db::models::task::Task;
use sitetrack_db::repositories::{
    CommentRepo, MediaRepo, MilestoneRepo, PhaseRepo, ProjectRepo, TaskRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::visibility::ensure_project_access;
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest accepted `day_width`, to keep chart geometry sane.
const MAX_DAY_WIDTH: i64 = 400;

/// Query params for `GET /projects/{id}/timeline`.
#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    /// Pixels per day column. Defaults to 40.
    pub day_width: Option<i64>,
}

/// Response payload: the project plus its positioned timeline.
#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub project: Project,
    #[serde(flatten)]
    pub layout: TimelineLayout,
}

/// GET /api/v1/projects/{id}/timeline
pub async fn get_timeline(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Query(query): Query<TimelineQuery>,
) -> AppResult<Json<DataResponse<TimelineResponse>>> {
    ensure_project_access(&state.pool, &user, id).await?;

    let day_width = query.day_width.unwrap_or(DEFAULT_DAY_WIDTH);
    if !(1..=MAX_DAY_WIDTH).contains(&day_width) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "day_width must be between 1 and {MAX_DAY_WIDTH}, got {day_width}"
        ))));
    }

    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let phases = PhaseRepo::list_by_project(&state.pool, id).await?;
    let tasks = TaskRepo::list_by_project(&state.pool, id).await?;
    let media = MediaRepo::list_by_project(&state.pool, id).await?;
    let comments = CommentRepo::list_by_project(&state.pool, id).await?;
    let milestones = MilestoneRepo::list_by_project(&state.pool, id).await?;

    let phase_records: Vec<PhaseRecord> = phases.iter().map(phase_record).collect();
    let task_records: Vec<TaskRecord> = tasks.iter().map(task_record).collect();
    let media_records: Vec<MediaRecord> = media.iter().map(media_record).collect();
    let comment_records: Vec<CommentRecord> = comments.iter().map(comment_record).collect();
    let milestone_records: Vec<MilestoneRecord> = milestones.iter().map(milestone_record).collect();

    let groups = build_task_groups(
        &project.name,
        &phase_records,
        &task_records,
        &media_records,
        &comment_records,
    );

    let config = TimelineConfig {
        day_width,
        ..TimelineConfig::default()
    };
    let layout = layout_timeline(
        project.start_date,
        project.end_date,
        groups,
        &milestone_records,
        &config,
    );

    Ok(Json(DataResponse {
        data: TimelineResponse { project, layout },
    }))
}

// ---------------------------------------------------------------------------
// Row -> record adapters
// ---------------------------------------------------------------------------

pub(crate) fn phase_record(phase: &Phase) -> PhaseRecord {
    PhaseRecord {
        id: phase.id,
        name: phase.name.clone(),
        color: phase.color.clone(),
        position: phase.position,
    }
}

pub(crate) fn task_record(task: &Task) -> TaskRecord {
    TaskRecord {
        id: task.id,
        name: task.name.clone(),
        project_name: task.project_name.clone(),
        phase_id: task.phase_id,
        trade: task.trade.clone(),
        status: task.status.as_str().to_string(),
        priority: task.priority.as_str().to_string(),
        progress: task.progress,
        start_date: task.start_date,
        end_date: task.end_date,
        due_date: task.due_date,
    }
}

pub(crate) fn media_record(media: &MediaFile) -> MediaRecord {
    MediaRecord {
        id: media.id,
        task_id: media.task_id,
        name: media.name.clone(),
        url: media.url.clone(),
        kind: media.kind.as_str().to_string(),
    }
}

pub(crate) fn comment_record(comment: &ProgressComment) -> CommentRecord {
    CommentRecord {
        id: comment.id,
        task_id: comment.task_id,
        author_name: comment.author_name.clone(),
        body: comment.body.clone(),
        previous_progress: comment.previous_progress,
        new_progress: comment.new_progress,
        created_at: comment.created_at,
    }
}

pub(crate) fn milestone_record(milestone: &Milestone) -> MilestoneRecord {
    MilestoneRecord {
        id: milestone.id,
        task_id: milestone.task_id,
        name: milestone.name.clone(),
        kind: milestone.kind.as_str().to_string(),
        date: milestone.date,
    }
}
