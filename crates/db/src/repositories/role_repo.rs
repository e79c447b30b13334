//! Repository for the seeded `roles` table.

use sitetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

/// Read-only access to the role lookup table.
pub struct RoleRepo;

impl RoleRepo {
    /// List all roles.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Find a role by its name (e.g. `"client"`).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a role id to its name. Errors if the id is unknown.
    pub async fn resolve_name(pool: &PgPool, id: DbId) -> Result<String, sqlx::Error> {
        let (name,): (String,) = sqlx::query_as("SELECT name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(name)
    }
}
