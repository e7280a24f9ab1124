//! Repository for the `thickness_measurements` table.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::thickness_measurement::{
    CreateThicknessMeasurement, ThicknessMeasurement, UpdateThicknessMeasurement,
};

/// Column list for thickness_measurements queries.
const COLUMNS: &str = "id, inspection_id, tml_number, object_type, activity, dimension, \
    t_nom, t_ret, t_alert, t_measured, position, comment, created_at, updated_at";

/// Provides CRUD operations for thickness measurement locations. No
/// cross-measurement invariants exist; rows are independent.
pub struct ThicknessMeasurementRepo;

impl ThicknessMeasurementRepo {
    /// Insert a new measurement on an inspection.
    pub async fn create(
        pool: &PgPool,
        inspection_id: DbId,
        input: &CreateThicknessMeasurement,
    ) -> Result<ThicknessMeasurement, sqlx::Error> {
        let query = format!(
            "INSERT INTO thickness_measurements
                (inspection_id, tml_number, object_type, activity, dimension,
                 t_nom, t_ret, t_alert, t_measured, position, comment)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThicknessMeasurement>(&query)
            .bind(inspection_id)
            .bind(&input.tml_number)
            .bind(&input.object_type)
            .bind(&input.activity)
            .bind(&input.dimension)
            .bind(input.t_nom)
            .bind(input.t_ret)
            .bind(input.t_alert)
            .bind(input.t_measured)
            .bind(&input.position)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find a measurement by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ThicknessMeasurement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM thickness_measurements WHERE id = $1");
        sqlx::query_as::<_, ThicknessMeasurement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all measurements for an inspection, ordered by TML number.
    pub async fn list_by_inspection(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Vec<ThicknessMeasurement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM thickness_measurements
             WHERE inspection_id = $1
             ORDER BY tml_number ASC"
        );
        sqlx::query_as::<_, ThicknessMeasurement>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }

    /// Update a measurement. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateThicknessMeasurement,
    ) -> Result<Option<ThicknessMeasurement>, sqlx::Error> {
        let query = format!(
            "UPDATE thickness_measurements SET
                tml_number = COALESCE($1, tml_number),
                object_type = COALESCE($2, object_type),
                activity = COALESCE($3, activity),
                dimension = COALESCE($4, dimension),
                t_nom = COALESCE($5, t_nom),
                t_ret = COALESCE($6, t_ret),
                t_alert = COALESCE($7, t_alert),
                t_measured = COALESCE($8, t_measured),
                position = COALESCE($9, position),
                comment = COALESCE($10, comment)
             WHERE id = $11
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThicknessMeasurement>(&query)
            .bind(&input.tml_number)
            .bind(&input.object_type)
            .bind(&input.activity)
            .bind(&input.dimension)
            .bind(input.t_nom)
            .bind(input.t_ret)
            .bind(input.t_alert)
            .bind(input.t_measured)
            .bind(&input.position)
            .bind(&input.comment)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a measurement. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM thickness_measurements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
