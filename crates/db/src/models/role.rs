//! Role lookup model.

use serde::Serialize;
use sitetrack_core::types::DbId;
use sqlx::FromRow;

/// A row from the seeded `roles` table (admin, member, client).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
}
