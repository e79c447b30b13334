//! Route tree definitions.

pub mod admin;
pub mod auth;
pub mod health;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                login (public)
/// /auth/refresh                              refresh (public)
/// /auth/logout                               logout (requires auth)
/// /auth/me                                   profile (requires auth)
///
/// /admin/users                               list, create (admin only)
/// /admin/users/{id}                          get, update, deactivate
/// /admin/users/{id}/reset-password           reset password (POST)
/// /admin/users/{id}/projects                 get, replace client assignments
///
/// /projects                                  list, create
/// /projects/{id}                             get, update, delete
/// /projects/{id}/stats                       derived statistics (GET)
/// /projects/{id}/timeline                    aggregated layout (GET)
/// /projects/{project_id}/phases              list, create
/// /projects/{project_id}/phases/reorder      reorder (POST)
/// /projects/{project_id}/tasks               list, create
///
/// /phases/{id}                               update, delete
///
/// /tasks/{id}                                get, update, delete
/// /tasks/{id}/phase                          assign/unassign phase (PUT)
/// /tasks/{id}/progress                       progress update (POST)
/// /tasks/{id}/comments                       progress history (GET)
/// /tasks/{task_id}/milestones                list, create
/// /tasks/{task_id}/media                     list, create
///
/// /milestones/{id}                           update, delete
/// /media/{id}                                update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .merge(project::router())
        .merge(task::router())
}
