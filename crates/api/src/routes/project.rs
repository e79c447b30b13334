//! Route definitions for the `/projects` resource, including nested phase
//! and task collections, and the standalone `/phases/{id}` item routes.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{phase, project, task, timeline};
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET    /projects                              -> list
/// POST   /projects                              -> create
/// GET    /projects/{id}                         -> get_by_id
/// PUT    /projects/{id}                         -> update
/// DELETE /projects/{id}                         -> delete
/// GET    /projects/{id}/stats                   -> stats
/// GET    /projects/{id}/timeline                -> get_timeline
///
/// GET    /projects/{project_id}/phases          -> list_by_project
/// POST   /projects/{project_id}/phases          -> create
/// POST   /projects/{project_id}/phases/reorder  -> reorder
///
/// GET    /projects/{project_id}/tasks           -> list_by_project
/// POST   /projects/{project_id}/tasks           -> create
///
/// PUT    /phases/{id}                           -> update
/// DELETE /phases/{id}                           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/projects/{id}/stats", get(project::stats))
        .route("/projects/{id}/timeline", get(timeline::get_timeline))
        .route(
            "/projects/{project_id}/phases",
            get(phase::list_by_project).post(phase::create),
        )
        .route("/projects/{project_id}/phases/reorder", post(phase::reorder))
        .route(
            "/projects/{project_id}/tasks",
            get(task::list_by_project).post(task::create),
        )
        .route("/phases/{id}", put(phase::update).delete(phase::delete))
}
