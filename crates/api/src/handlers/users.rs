//! Handlers for the `/admin/users` resource (admin only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sitetrack_core::error::CoreError;
use sitetrack_core::roles::ROLE_CLIENT;
use sitetrack_core::types::DbId;
use sitetrack_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use sitetrack_db::repositories::{AssignmentRepo, RoleRepo, SessionRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
    pub password: String,
    /// Role name: `admin`, `member`, or `client`.
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub display_name: Option<String>,
    /// Role name: `admin`, `member`, or `client`.
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Request body for `PUT /admin/users/{id}/projects`.
#[derive(Debug, Deserialize)]
pub struct AssignProjectsRequest {
    pub project_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    if input.username.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = resolve_role(&state, &input.role).await?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A duplicate username trips uq_users_username and maps to 409.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            display_name: input.display_name,
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(user, role.name))))
}

/// GET /api/v1/admin/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;

    let mut out = Vec::with_capacity(users.len());
    for user in users {
        let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
        out.push(to_response(user, role));
    }
    Ok(Json(out))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(to_response(user, role)))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let role_id = match &input.role {
        Some(name) => Some(resolve_role(&state, name).await?.id),
        None => None,
    };

    let user = UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            username: input.username,
            display_name: input.display_name,
            role_id,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(to_response(user, role)))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivates the account (no hard delete: authored comments and uploads
/// keep their author reference) and revokes its sessions.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::set_password_hash(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/users/{id}/projects
pub async fn list_assigned_projects(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<DbId>>> {
    let ids = AssignmentRepo::list_project_ids(&state.pool, id).await?;
    Ok(Json(ids))
}

/// PUT /api/v1/admin/users/{id}/projects
///
/// Replace a client's project visibility list. Only client-role users carry
/// assignments; other roles see everything already.
pub async fn assign_projects(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AssignProjectsRequest>,
) -> AppResult<Json<Vec<DbId>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    if role != ROLE_CLIENT {
        return Err(AppError::Core(CoreError::Validation(
            "Project assignments apply to client accounts only".into(),
        )));
    }

    AssignmentRepo::replace_for_user(&state.pool, id, &input.project_ids).await?;
    let ids = AssignmentRepo::list_project_ids(&state.pool, id).await?;
    Ok(Json(ids))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn resolve_role(state: &AppState, name: &str) -> AppResult<sitetrack_db::models::role::Role> {
    RoleRepo::find_by_name(&state.pool, name)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("Unknown role: {name}"))))
}

fn to_response(user: User, role: String) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        role,
        role_id: user.role_id,
        is_active: user.is_active,
        last_login_at: user.last_login_at,
        created_at: user.created_at,
    }
}
