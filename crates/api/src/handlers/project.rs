//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitetrack_core::aggregate::{project_stats, ProjectStats};
use sitetrack_core::error::CoreError;
use sitetrack_core::roles::ROLE_CLIENT;
use sitetrack_core::types::DbId;
use sitetrack_db::models::project::{CreateProject, Project, UpdateProject};
use sitetrack_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::timeline::task_record;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireMember};
use crate::middleware::visibility::ensure_project_access;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if let Some(progress) = input.progress {
        sitetrack_core::progress::validate_progress(progress)?;
    }
    let project = ProjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// Admins and members see every project; clients only their assigned ones.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Project>>> {
    let projects = if user.role == ROLE_CLIENT {
        ProjectRepo::list_assigned(&state.pool, user.user_id).await?
    } else {
        ProjectRepo::list(&state.pool).await?
    };
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    ensure_project_access(&state.pool, &user, id).await?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    if let Some(progress) = input.progress {
        sitetrack_core::progress::validate_progress(progress)?;
    }
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

/// GET /api/v1/projects/{id}/stats
///
/// Derived statistics over the project's tasks: overall progress and counts
/// by status.
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectStats>>> {
    ensure_project_access(&state.pool, &user, id).await?;
    // 404 before computing stats for a project that does not exist.
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let tasks = TaskRepo::list_by_project(&state.pool, id).await?;
    let records: Vec<_> = tasks.iter().map(task_record).collect();
    Ok(Json(DataResponse {
        data: project_stats(&records),
    }))
}
