//! Handlers for media attachments under `/tasks/{task_id}/media` and
//! `/media/{id}`.
//!
//! Only the URL reference is stored here; upload and durable storage are the
//! external file store's contract.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitetrack_core::error::CoreError;
use sitetrack_core::types::DbId;
use sitetrack_db::models::media_file::{CreateMediaFile, MediaFile, UpdateMediaFile};
use sitetrack_db::repositories::{MediaRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::task::find_task;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireMember;
use crate::middleware::visibility::ensure_project_access;
use crate::state::AppState;

/// POST /api/v1/tasks/{task_id}/media
pub async fn create(
    State(state): State<AppState>,
    RequireMember(user): RequireMember,
    Path(task_id): Path<DbId>,
    Json(input): Json<CreateMediaFile>,
) -> AppResult<(StatusCode, Json<MediaFile>)> {
    // The owning task must exist before any write.
    find_task(&state, task_id).await?;

    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Media URL must not be empty".into(),
        )));
    }

    let uploader = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    let media = MediaRepo::create(
        &state.pool,
        task_id,
        uploader.id,
        &uploader.display_name,
        &input,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(media)))
}

/// GET /api/v1/tasks/{task_id}/media
pub async fn list_by_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<Vec<MediaFile>>> {
    let task = find_task(&state, task_id).await?;
    ensure_project_access(&state.pool, &user, task.project_id).await?;
    let media = MediaRepo::list_by_task(&state.pool, task_id).await?;
    Ok(Json(media))
}

/// PATCH /api/v1/media/{id}
///
/// Name and description are the only mutable fields; the URL and kind are
/// fixed at upload.
pub async fn update(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMediaFile>,
) -> AppResult<Json<MediaFile>> {
    let media = MediaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaFile",
            id,
        }))?;
    Ok(Json(media))
}

/// DELETE /api/v1/media/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MediaRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MediaFile",
            id,
        }))
    }
}
