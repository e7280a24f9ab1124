//! Repository for the `annotations` table.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::annotation::{Annotation, CreateAnnotation, UpdateAnnotation};

/// Column list for annotations queries.
const COLUMNS: &str = "id, diagram_id, annotation_type, kks_number, geometry, color, \
    stroke_width, description, material, diameter, last_inspection, next_inspection, \
    status, created_at, updated_at";

/// Provides CRUD operations for annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Insert a new annotation on a diagram.
    ///
    /// `color`, `stroke_width` and `status` fall back to their column
    /// defaults when omitted.
    pub async fn create(
        pool: &PgPool,
        diagram_id: DbId,
        input: &CreateAnnotation,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations
                (diagram_id, annotation_type, kks_number, geometry, color,
                 stroke_width, description, material, diameter, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, '#3b82f6'), COALESCE($6, 2),
                     $7, $8, $9, COALESCE($10, 'not_inspected'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(diagram_id)
            .bind(&input.annotation_type)
            .bind(&input.kks_number)
            .bind(&input.geometry)
            .bind(&input.color)
            .bind(input.stroke_width)
            .bind(&input.description)
            .bind(&input.material)
            .bind(&input.diameter)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find an annotation by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE id = $1");
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all annotations on a diagram, ordered by KKS number.
    pub async fn list_by_diagram(
        pool: &PgPool,
        diagram_id: DbId,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations WHERE diagram_id = $1 ORDER BY kks_number ASC"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(diagram_id)
            .fetch_all(pool)
            .await
    }

    /// Update an annotation. Only non-`None` fields are applied; the
    /// inspection-synchronized date fields are not reachable from here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnotation,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "UPDATE annotations SET
                annotation_type = COALESCE($1, annotation_type),
                kks_number = COALESCE($2, kks_number),
                geometry = COALESCE($3, geometry),
                color = COALESCE($4, color),
                stroke_width = COALESCE($5, stroke_width),
                description = COALESCE($6, description),
                material = COALESCE($7, material),
                diameter = COALESCE($8, diameter),
                status = COALESCE($9, status)
             WHERE id = $10
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(&input.annotation_type)
            .bind(&input.kks_number)
            .bind(&input.geometry)
            .bind(&input.color)
            .bind(input.stroke_width)
            .bind(&input.description)
            .bind(&input.material)
            .bind(&input.diameter)
            .bind(&input.status)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an annotation and, by cascade, its inspections and their
    /// children. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Inputs for the computed status suggestion: the latest inspection's
    /// overall status (by inspection date, then recency) and whether any
    /// of that inspection's measurements is critical.
    pub async fn latest_outcome_and_critical(
        pool: &PgPool,
        annotation_id: DbId,
    ) -> Result<(Option<String>, bool), sqlx::Error> {
        let row: Option<(String, bool)> = sqlx::query_as(
            "SELECT i.overall_status,
                    EXISTS (
                        SELECT 1 FROM thickness_measurements tm
                        WHERE tm.inspection_id = i.id
                          AND tm.t_measured IS NOT NULL
                          AND tm.t_alert IS NOT NULL
                          AND tm.t_measured < tm.t_alert
                    )
             FROM inspections i
             WHERE i.annotation_id = $1
             ORDER BY i.inspection_date DESC, i.id DESC
             LIMIT 1",
        )
        .bind(annotation_id)
        .fetch_optional(pool)
        .await?;

        Ok(match row {
            Some((status, critical)) => (Some(status), critical),
            None => (None, false),
        })
    }
}
