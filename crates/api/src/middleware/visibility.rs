//! Project visibility checks for client-role users.
//!
//! Admins and members see every project; a client sees only the projects on
//! their assignment list.

use sitetrack_core::error::CoreError;
use sitetrack_core::roles::ROLE_CLIENT;
use sitetrack_core::types::DbId;
use sitetrack_db::repositories::AssignmentRepo;
use sitetrack_db::DbPool;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;

/// Reject with 403 Forbidden if `user` is a client without an assignment for
/// `project_id`. Non-client roles always pass.
pub async fn ensure_project_access(
    pool: &DbPool,
    user: &AuthUser,
    project_id: DbId,
) -> Result<(), AppError> {
    if user.role != ROLE_CLIENT {
        return Ok(());
    }
    if AssignmentRepo::is_assigned(pool, user.user_id, project_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Project is not assigned to this account".into(),
        )))
    }
}
