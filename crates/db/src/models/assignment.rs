//! Client project assignment model.

use serde::Serialize;
use sitetrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `project_assignments` table. Client-role users see only
/// the projects assigned to them; admins and members see everything.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectAssignment {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub created_at: Timestamp,
}
