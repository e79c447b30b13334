//! Handlers for milestones under `/tasks/{task_id}/milestones` and
//! `/milestones/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitetrack_core::error::CoreError;
use sitetrack_core::types::DbId;
use sitetrack_db::models::milestone::{CreateMilestone, Milestone, UpdateMilestone};
use sitetrack_db::repositories::MilestoneRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::task::find_task;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireMember;
use crate::middleware::visibility::ensure_project_access;
use crate::state::AppState;

/// POST /api/v1/tasks/{task_id}/milestones
pub async fn create(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(task_id): Path<DbId>,
    Json(input): Json<CreateMilestone>,
) -> AppResult<(StatusCode, Json<Milestone>)> {
    // The owning task must exist before any write.
    find_task(&state, task_id).await?;
    let milestone = MilestoneRepo::create(&state.pool, task_id, &input).await?;
    Ok((StatusCode::CREATED, Json(milestone)))
}

/// GET /api/v1/tasks/{task_id}/milestones
pub async fn list_by_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<Vec<Milestone>>> {
    let task = find_task(&state, task_id).await?;
    ensure_project_access(&state.pool, &user, task.project_id).await?;
    let milestones = MilestoneRepo::list_by_task(&state.pool, task_id).await?;
    Ok(Json(milestones))
}

/// PUT /api/v1/milestones/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMilestone>,
) -> AppResult<Json<Milestone>> {
    let milestone = MilestoneRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;
    Ok(Json(milestone))
}

/// DELETE /api/v1/milestones/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MilestoneRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))
    }
}
