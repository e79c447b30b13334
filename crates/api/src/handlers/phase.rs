//! Handlers for phases under `/projects/{project_id}/phases` and
//! `/phases/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sitetrack_core::error::CoreError;
use sitetrack_core::types::DbId;
use sitetrack_db::models::phase::{CreatePhase, Phase, UpdatePhase};
use sitetrack_db::repositories::{PhaseRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireMember;
use crate::middleware::visibility::ensure_project_access;
use crate::state::AppState;

/// Request body for `POST /projects/{project_id}/phases/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    /// The project's phase ids in the desired display order. Must be exactly
    /// the current set, no more, no fewer.
    pub phase_ids: Vec<DbId>,
}

/// POST /api/v1/projects/{project_id}/phases
pub async fn create(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreatePhase>,
) -> AppResult<(StatusCode, Json<Phase>)> {
    // The owning project must exist before any write.
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let phase = PhaseRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(phase)))
}

/// GET /api/v1/projects/{project_id}/phases
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Phase>>> {
    ensure_project_access(&state.pool, &user, project_id).await?;
    let phases = PhaseRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(phases))
}

/// PUT /api/v1/phases/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePhase>,
) -> AppResult<Json<Phase>> {
    let phase = PhaseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Phase",
            id,
        }))?;
    Ok(Json(phase))
}

/// DELETE /api/v1/phases/{id}
///
/// Member tasks fall back to unassigned; surviving phases are resequenced to
/// dense 0..n-1.
pub async fn delete(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PhaseRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Phase",
            id,
        }))
    }
}

/// POST /api/v1/projects/{project_id}/phases/reorder
///
/// Rewrites positions to match the submitted order. The submitted ids must
/// be exactly the project's phase set; anything else is rejected before the
/// rewrite so the dense 0..n-1 invariant cannot be broken.
pub async fn reorder(
    State(state): State<AppState>,
    RequireMember(_user): RequireMember,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<Vec<Phase>>> {
    let current = PhaseRepo::list_by_project(&state.pool, project_id).await?;

    let mut current_ids: Vec<DbId> = current.iter().map(|p| p.id).collect();
    let mut submitted = input.phase_ids.clone();
    current_ids.sort_unstable();
    submitted.sort_unstable();
    if current_ids != submitted {
        return Err(AppError::Core(CoreError::Validation(
            "Reorder must list exactly the project's phase ids".into(),
        )));
    }

    PhaseRepo::reorder(&state.pool, project_id, &input.phase_ids).await?;
    let phases = PhaseRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(phases))
}
