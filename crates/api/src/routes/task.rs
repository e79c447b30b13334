//! Route definitions for task item routes and nested task collections
//! (comments, milestones, media), plus the standalone milestone/media item
//! routes.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{media, milestone, task};
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET    /tasks/{id}                    -> get_by_id
/// PUT    /tasks/{id}                    -> update (general edit)
/// DELETE /tasks/{id}                    -> delete
/// PUT    /tasks/{id}/phase              -> assign_phase
/// POST   /tasks/{id}/progress           -> update_progress
/// GET    /tasks/{id}/comments           -> list_comments
///
/// GET    /tasks/{task_id}/milestones    -> list_by_task
/// POST   /tasks/{task_id}/milestones    -> create
/// GET    /tasks/{task_id}/media         -> list_by_task
/// POST   /tasks/{task_id}/media         -> create
///
/// PUT    /milestones/{id}               -> update
/// DELETE /milestones/{id}               -> delete
/// PATCH  /media/{id}                    -> update
/// DELETE /media/{id}                    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tasks/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/tasks/{id}/phase", put(task::assign_phase))
        .route("/tasks/{id}/progress", post(task::update_progress))
        .route("/tasks/{id}/comments", get(task::list_comments))
        .route(
            "/tasks/{task_id}/milestones",
            get(milestone::list_by_task).post(milestone::create),
        )
        .route(
            "/tasks/{task_id}/media",
            get(media::list_by_task).post(media::create),
        )
        .route(
            "/milestones/{id}",
            put(milestone::update).delete(milestone::delete),
        )
        .route("/media/{id}", patch(media::update).delete(media::delete))
}
