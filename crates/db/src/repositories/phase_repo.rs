//! Repository for the `phases` table.
//!
//! Maintains the invariant that `position` values are dense 0..n-1 per
//! project after any reorder or delete. The position unique constraint is
//! deferred, so in-transaction swaps are legal.

use sitetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::phase::{CreatePhase, Phase, UpdatePhase};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, description, start_date, end_date, color, \
     position, created_at, updated_at";

/// Default phase display color; must match the column default in the phases
/// migration and `sitetrack_core::palette::DEFAULT_PHASE_COLOR`.
const DEFAULT_COLOR: &str = "#3b82f6";

/// Provides CRUD and ordering operations for phases.
pub struct PhaseRepo;

impl PhaseRepo {
    /// Insert a new phase at the end of the project's sequence.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreatePhase,
    ) -> Result<Phase, sqlx::Error> {
        let query = format!(
            "INSERT INTO phases (project_id, name, description, start_date, end_date, color, position)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, $7),
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM phases WHERE project_id = $1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.color)
            .bind(DEFAULT_COLOR)
            .fetch_one(pool)
            .await
    }

    /// Find a phase by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Phase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM phases WHERE id = $1");
        sqlx::query_as::<_, Phase>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's phases in display order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Phase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM phases WHERE project_id = $1 ORDER BY position");
        sqlx::query_as::<_, Phase>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a phase. Only non-`None` fields in `input` are applied;
    /// position changes go through [`Self::reorder`].
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePhase,
    ) -> Result<Option<Phase>, sqlx::Error> {
        let query = format!(
            "UPDATE phases SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                color = COALESCE($6, color),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Rewrite a project's phase positions to match `ordered_ids`, 0..n-1.
    ///
    /// The caller is responsible for validating that `ordered_ids` is exactly
    /// the set of the project's phase ids; this method only applies the
    /// mechanical rewrite, in one transaction.
    pub async fn reorder(
        pool: &PgPool,
        project_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (position, phase_id) in ordered_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE phases SET position = $3, updated_at = NOW()
                 WHERE id = $1 AND project_id = $2",
            )
            .bind(phase_id)
            .bind(project_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    /// Delete a phase and close the gap it leaves: surviving phases of the
    /// project are resequenced to dense 0..n-1 in the same transaction.
    /// Member tasks fall back to unassigned via the FK's SET NULL.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM phases WHERE id = $1 RETURNING project_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((project_id,)) = deleted else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query(
            "UPDATE phases SET position = renumbered.new_position
             FROM (SELECT id, (ROW_NUMBER() OVER (ORDER BY position) - 1)::INT AS new_position
                   FROM phases WHERE project_id = $1) AS renumbered
             WHERE phases.id = renumbered.id",
        )
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
