//! Handlers for tasks: CRUD under `/projects/{project_id}/tasks` and
//! `/tasks/{id}`, phase assignment, and the dedicated progress-update
//! operation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sitetrack_core::error::CoreError;
use sitetrack_core::progress::{status_for_progress, validate_comment, validate_progress};
use sitetrack_core::types::DbId;
use sitetrack_db::models::progress_comment::ProgressComment;
use sitetrack_db::models::task::{CreateTask, Task, UpdateTask};
use sitetrack_db::repositories::{CommentRepo, PhaseRepo, ProjectRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireMember;
use crate::middleware::visibility::ensure_project_access;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /tasks/{id}/phase`.
#[derive(Debug, Deserialize)]
pub struct AssignPhaseRequest {
    /// Target phase, or null to return the task to unassigned.
    pub phase_id: Option<DbId>,
}

/// Request body for `POST /tasks/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct ProgressUpdateRequest {
    pub new_progress: i32,
    /// Mandatory; rejected when empty or whitespace-only.
    pub comment: String,
}

/// Response body for `POST /tasks/{id}/progress`.
#[derive(Debug, Serialize)]
pub struct ProgressUpdateResponse {
    pub task: Task,
    pub comment: ProgressComment,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{project_id}/tasks
///
/// The owning project is looked up first; if it does not exist the operation
/// aborts before any write. Its name is denormalized onto the task row.
pub async fn create(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    if let Some(progress) = input.progress {
        validate_progress(progress)?;
    }
    if let Some(phase_id) = input.phase_id {
        ensure_phase_in_project(&state, phase_id, project_id).await?;
    }

    let task = TaskRepo::create(&state.pool, project.id, &project.name, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    ensure_project_access(&state.pool, &user, project_id).await?;
    let tasks = TaskRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = find_task(&state, id).await?;
    ensure_project_access(&state.pool, &user, task.project_id).await?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id}
///
/// The general edit: status and progress are applied independently and are
/// NOT reconciled against each other. A task edited to completed at 40%
/// stays that way; only the progress-update operation derives status.
pub async fn update(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    if let Some(progress) = input.progress {
        validate_progress(progress)?;
    }
    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}

// ---------------------------------------------------------------------------
// Phase assignment
// ---------------------------------------------------------------------------

/// PUT /api/v1/tasks/{id}/phase
///
/// Unlike the general edit, this writes the value verbatim: null moves the
/// task back to unassigned. The target phase must belong to the task's
/// project.
pub async fn assign_phase(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
    Json(input): Json<AssignPhaseRequest>,
) -> AppResult<Json<Task>> {
    let task = find_task(&state, id).await?;
    if let Some(phase_id) = input.phase_id {
        ensure_phase_in_project(&state, phase_id, task.project_id).await?;
    }
    let task = TaskRepo::set_phase(&state.pool, id, input.phase_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// POST /api/v1/tasks/{id}/progress
///
/// The dedicated progress-update path: validates input, derives the status
/// from the new progress (100 -> completed, 0 -> planned, otherwise
/// in-progress), and appends exactly one immutable progress comment, all in
/// one transaction.
pub async fn update_progress(
    State(state): State<AppState>,
    RequireMember(user): RequireMember,
    Path(id): Path<DbId>,
    Json(input): Json<ProgressUpdateRequest>,
) -> AppResult<Json<ProgressUpdateResponse>> {
    validate_progress(input.new_progress)?;
    validate_comment(&input.comment)?;

    let author = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    let status = status_for_progress(input.new_progress);
    let (task, comment) = TaskRepo::update_progress(
        &state.pool,
        id,
        input.new_progress,
        status,
        author.id,
        &author.display_name,
        input.comment.trim(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    Ok(Json(ProgressUpdateResponse { task, comment }))
}

/// GET /api/v1/tasks/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ProgressComment>>> {
    let task = find_task(&state, id).await?;
    ensure_project_access(&state.pool, &user, task.project_id).await?;
    let comments = CommentRepo::list_by_task(&state.pool, id).await?;
    Ok(Json(comments))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_task(state: &AppState, id: DbId) -> AppResult<Task> {
    TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))
}

async fn ensure_phase_in_project(
    state: &AppState,
    phase_id: DbId,
    project_id: DbId,
) -> AppResult<()> {
    let phase = PhaseRepo::find_by_id(&state.pool, phase_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Phase",
            id: phase_id,
        }))?;
    if phase.project_id != project_id {
        return Err(AppError::Core(CoreError::Validation(
            "Phase belongs to a different project".into(),
        )));
    }
    Ok(())
}
