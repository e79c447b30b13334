//! Route definitions for the `/admin` resource (user management).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users                       -> list
/// POST   /users                       -> create
/// GET    /users/{id}                  -> get_by_id
/// PUT    /users/{id}                  -> update
/// DELETE /users/{id}                  -> deactivate
/// POST   /users/{id}/reset-password   -> reset_password
/// GET    /users/{id}/projects         -> list_assigned_projects
/// PUT    /users/{id}/projects         -> assign_projects
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{id}",
            get(users::get_by_id)
                .put(users::update)
                .delete(users::deactivate),
        )
        .route("/users/{id}/reset-password", post(users::reset_password))
        .route(
            "/users/{id}/projects",
            put(users::assign_projects).get(users::list_assigned_projects),
        )
}
