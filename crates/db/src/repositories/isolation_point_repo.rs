//! Repository for the `isolation_points` table.
//!
//! Point reads always join the three actor display names and are returned
//! as [`IsolationPointView`], which decodes the stored geometry payload
//! into discrete `x` / `y` fields. Status, actor and timestamp columns are
//! written only by the dedicated mark_* operations.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::isolation_point::{
    CreateIsolationPoint, IsolationPointRow, IsolationPointView, UpdateIsolationPoint,
};

/// Joined column list for point reads.
const VIEW_COLUMNS: &str = "pt.id, pt.plan_id, pt.point_type, pt.tag_number, \
    pt.description, pt.sequence_number, pt.normal_position, pt.isolated_position, \
    pt.geometry, pt.color, pt.status, pt.isolated_by, pt.isolated_at, pt.verified_by, \
    pt.verified_at, pt.restored_by, pt.restored_at, pt.notes, \
    ui.full_name AS isolated_by_name, uv.full_name AS verified_by_name, \
    ur.full_name AS restored_by_name, pt.created_at, pt.updated_at";

/// Actor-name joins shared by all point reads.
const VIEW_JOINS: &str = "FROM isolation_points pt \
    LEFT JOIN users ui ON ui.id = pt.isolated_by \
    LEFT JOIN users uv ON uv.id = pt.verified_by \
    LEFT JOIN users ur ON ur.id = pt.restored_by";

/// Provides ledger operations for isolation points.
pub struct IsolationPointRepo;

impl IsolationPointRepo {
    /// Add a point to a plan in `pending` status.
    ///
    /// Returns `None` when the plan does not exist. When no explicit
    /// sequence number is supplied the next one is assigned as
    /// `max(existing in plan) + 1`, starting at 1; the plan row is locked
    /// for the insert so concurrent adds cannot race to the same number.
    /// Existing numbers are never shifted.
    pub async fn create(
        pool: &PgPool,
        plan_id: DbId,
        input: &CreateIsolationPoint,
    ) -> Result<Option<IsolationPointView>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let plan: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM isolation_plans WHERE id = $1 FOR UPDATE")
                .bind(plan_id)
                .fetch_optional(&mut *tx)
                .await?;
        if plan.is_none() {
            return Ok(None);
        }

        let geometry = serde_json::to_value(input.geometry)
            .unwrap_or_else(|_| serde_json::json!({"x": 0.0, "y": 0.0}));

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO isolation_points
                (plan_id, point_type, tag_number, description, sequence_number,
                 normal_position, isolated_position, geometry, color, notes)
             VALUES (
                $1, $2, $3, $4,
                COALESCE($5, (SELECT COALESCE(MAX(sequence_number), 0) + 1
                              FROM isolation_points WHERE plan_id = $1)),
                $6, $7, $8, COALESCE($9, '#ef4444'), $10
             )
             RETURNING id",
        )
        .bind(plan_id)
        .bind(&input.point_type)
        .bind(&input.tag_number)
        .bind(&input.description)
        .bind(input.sequence_number)
        .bind(&input.normal_position)
        .bind(&input.isolated_position)
        .bind(&geometry)
        .bind(&input.color)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Find a point by its ID, with actor names joined.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<IsolationPointView>, sqlx::Error> {
        let query = format!("SELECT {VIEW_COLUMNS} {VIEW_JOINS} WHERE pt.id = $1");
        let row: Option<IsolationPointRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(IsolationPointView::from))
    }

    /// List a plan's points in sequence order.
    pub async fn list_by_plan(
        pool: &PgPool,
        plan_id: DbId,
    ) -> Result<Vec<IsolationPointView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} {VIEW_JOINS}
             WHERE pt.plan_id = $1
             ORDER BY pt.sequence_number ASC"
        );
        let rows: Vec<IsolationPointRow> = sqlx::query_as(&query)
            .bind(plan_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(IsolationPointView::from).collect())
    }

    /// Free-form point edit. Only non-`None` fields are applied; status,
    /// actor and timestamp columns are not reachable from here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIsolationPoint,
    ) -> Result<Option<IsolationPointView>, sqlx::Error> {
        let geometry = input
            .geometry
            .map(|g| serde_json::to_value(g).unwrap_or_else(|_| serde_json::json!({})));

        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE isolation_points SET
                point_type = COALESCE($1, point_type),
                tag_number = COALESCE($2, tag_number),
                description = COALESCE($3, description),
                sequence_number = COALESCE($4, sequence_number),
                normal_position = COALESCE($5, normal_position),
                isolated_position = COALESCE($6, isolated_position),
                geometry = COALESCE($7, geometry),
                color = COALESCE($8, color),
                notes = COALESCE($9, notes)
             WHERE id = $10
             RETURNING id",
        )
        .bind(&input.point_type)
        .bind(&input.tag_number)
        .bind(&input.description)
        .bind(input.sequence_number)
        .bind(&input.normal_position)
        .bind(&input.isolated_position)
        .bind(geometry)
        .bind(&input.color)
        .bind(&input.notes)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some((id,)) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Stamp a point isolated by the given actor.
    pub async fn mark_isolated(
        pool: &PgPool,
        id: DbId,
        actor: DbId,
    ) -> Result<Option<IsolationPointView>, sqlx::Error> {
        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE isolation_points
             SET status = 'isolated', isolated_by = $2, isolated_at = now()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(actor)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some((id,)) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Stamp a point verified by the given actor.
    pub async fn mark_verified(
        pool: &PgPool,
        id: DbId,
        actor: DbId,
    ) -> Result<Option<IsolationPointView>, sqlx::Error> {
        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE isolation_points
             SET status = 'verified', verified_by = $2, verified_at = now()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(actor)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some((id,)) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Stamp a point restored by the given actor.
    pub async fn mark_restored(
        pool: &PgPool,
        id: DbId,
        actor: DbId,
    ) -> Result<Option<IsolationPointView>, sqlx::Error> {
        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE isolation_points
             SET status = 'restored', restored_by = $2, restored_at = now()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(actor)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some((id,)) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a point. Unconditional; nothing cascades beyond the row.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM isolation_points WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
