//! Repository for the `inspections` and `checklist_items` tables.
//!
//! Inspection creation seeds the fixed 19-item checklist and synchronizes
//! the parent annotation's inspection dates; both happen in the same
//! transaction as the insert so a partial failure can never leave an
//! inspection without its checklist or an out-of-date annotation.

use sqlx::PgPool;

use isotrack_core::checklist::{CHECKLIST_TEMPLATE, SEED_STATUS};
use isotrack_core::types::DbId;

use crate::models::checklist_item::{BulkChecklistItem, ChecklistItem, UpdateChecklistItem};
use crate::models::inspection::{CreateInspection, Inspection, InspectionDetail, UpdateInspection};
use crate::models::inspection_file::{InspectionDocument, InspectionImage};
use crate::models::thickness_measurement::ThicknessMeasurement;

/// Column list for inspections queries.
const COLUMNS: &str = "id, annotation_id, report_number, inspection_date, \
    next_inspection_date, inspector_name, inspector_cert, approver_name, \
    approver_cert, overall_status, conclusion, created_at, updated_at";

/// Column list for checklist_items queries.
const CHECKLIST_COLUMNS: &str = "id, inspection_id, item_number, item_name, status, \
    comment, reference, created_at, updated_at";

/// Provides CRUD and checklist operations for inspections.
pub struct InspectionRepo;

impl InspectionRepo {
    /// Create an inspection on an annotation.
    ///
    /// Returns `None` when the annotation does not exist. On success the
    /// inspection row, the 19 seeded checklist items and the annotation
    /// date sync are committed atomically.
    pub async fn create(
        pool: &PgPool,
        annotation_id: DbId,
        input: &CreateInspection,
    ) -> Result<Option<InspectionDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM annotations WHERE id = $1 FOR UPDATE")
                .bind(annotation_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO inspections
                (annotation_id, report_number, inspection_date, next_inspection_date,
                 inspector_name, inspector_cert, approver_name, approver_cert,
                 overall_status, conclusion)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'pending'), $10)
             RETURNING {COLUMNS}"
        );
        let inspection = sqlx::query_as::<_, Inspection>(&query)
            .bind(annotation_id)
            .bind(&input.report_number)
            .bind(input.inspection_date)
            .bind(input.next_inspection_date)
            .bind(&input.inspector_name)
            .bind(&input.inspector_cert)
            .bind(&input.approver_name)
            .bind(&input.approver_cert)
            .bind(&input.overall_status)
            .bind(&input.conclusion)
            .fetch_one(&mut *tx)
            .await?;

        // Seed the fixed checklist in one multi-row insert.
        let numbers: Vec<i32> = CHECKLIST_TEMPLATE.iter().map(|item| item.number).collect();
        let names: Vec<&str> = CHECKLIST_TEMPLATE.iter().map(|item| item.name).collect();
        let seed_query = format!(
            "INSERT INTO checklist_items (inspection_id, item_number, item_name, status)
             SELECT $1, n, name, $2
             FROM UNNEST($3::int[], $4::text[]) AS t(n, name)
             RETURNING {CHECKLIST_COLUMNS}"
        );
        let checklist = sqlx::query_as::<_, ChecklistItem>(&seed_query)
            .bind(inspection.id)
            .bind(SEED_STATUS.as_str())
            .bind(&numbers)
            .bind(&names)
            .fetch_all(&mut *tx)
            .await?;

        // Overwrite the parent annotation's inspection dates.
        sqlx::query(
            "UPDATE annotations SET last_inspection = $1, next_inspection = $2 WHERE id = $3",
        )
        .bind(inspection.inspection_date)
        .bind(inspection.next_inspection_date)
        .bind(annotation_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(InspectionDetail {
            inspection,
            checklist,
            measurements: Vec::new(),
            images: Vec::new(),
            documents: Vec::new(),
        }))
    }

    /// Find an inspection by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inspections WHERE id = $1");
        sqlx::query_as::<_, Inspection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load an inspection with all of its child collections.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InspectionDetail>, sqlx::Error> {
        let Some(inspection) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let checklist = Self::list_checklist(pool, id).await?;

        let measurements = sqlx::query_as::<_, ThicknessMeasurement>(
            "SELECT id, inspection_id, tml_number, object_type, activity, dimension,
                    t_nom, t_ret, t_alert, t_measured, position, comment,
                    created_at, updated_at
             FROM thickness_measurements
             WHERE inspection_id = $1
             ORDER BY tml_number ASC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let images = sqlx::query_as::<_, InspectionImage>(
            "SELECT id, inspection_id, file_name, caption, created_at, updated_at
             FROM inspection_images WHERE inspection_id = $1 ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let documents = sqlx::query_as::<_, InspectionDocument>(
            "SELECT id, inspection_id, file_name, title, created_at, updated_at
             FROM inspection_documents WHERE inspection_id = $1 ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(Some(InspectionDetail {
            inspection,
            checklist,
            measurements,
            images,
            documents,
        }))
    }

    /// List an annotation's inspection history, newest first.
    pub async fn list_by_annotation(
        pool: &PgPool,
        annotation_id: DbId,
    ) -> Result<Vec<Inspection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inspections
             WHERE annotation_id = $1
             ORDER BY inspection_date DESC, id DESC"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(annotation_id)
            .fetch_all(pool)
            .await
    }

    /// Update an inspection.
    ///
    /// Plain optional fields keep their prior value when absent. The
    /// clearable fields (next inspection date, certs, approver name,
    /// conclusion) distinguish "absent" from explicit NULL. When either
    /// date is present the parent annotation is resynchronized in the
    /// same transaction.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInspection,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE inspections SET
                report_number = COALESCE($1, report_number),
                inspection_date = COALESCE($2, inspection_date),
                next_inspection_date = CASE WHEN $3 THEN $4 ELSE next_inspection_date END,
                inspector_name = COALESCE($5, inspector_name),
                inspector_cert = CASE WHEN $6 THEN $7 ELSE inspector_cert END,
                approver_name = CASE WHEN $8 THEN $9 ELSE approver_name END,
                approver_cert = CASE WHEN $10 THEN $11 ELSE approver_cert END,
                overall_status = COALESCE($12, overall_status),
                conclusion = CASE WHEN $13 THEN $14 ELSE conclusion END
             WHERE id = $15
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Inspection>(&query)
            .bind(&input.report_number)
            .bind(input.inspection_date)
            .bind(input.next_inspection_date.is_some())
            .bind(input.next_inspection_date.flatten())
            .bind(&input.inspector_name)
            .bind(input.inspector_cert.is_some())
            .bind(input.inspector_cert.clone().flatten())
            .bind(input.approver_name.is_some())
            .bind(input.approver_name.clone().flatten())
            .bind(input.approver_cert.is_some())
            .bind(input.approver_cert.clone().flatten())
            .bind(&input.overall_status)
            .bind(input.conclusion.is_some())
            .bind(input.conclusion.clone().flatten())
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(updated) = updated else {
            return Ok(None);
        };

        if input.inspection_date.is_some() || input.next_inspection_date.is_some() {
            sqlx::query(
                "UPDATE annotations SET last_inspection = $1, next_inspection = $2
                 WHERE id = $3",
            )
            .bind(updated.inspection_date)
            .bind(updated.next_inspection_date)
            .bind(updated.annotation_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Stored file names for this inspection's images and documents.
    /// Callers remove these via the file store before deleting the row.
    pub async fn file_names_for_cleanup(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT file_name FROM inspection_images WHERE inspection_id = $1
             UNION ALL
             SELECT file_name FROM inspection_documents WHERE inspection_id = $1",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    /// Delete an inspection. Checklist items, measurements, image and
    /// document rows go with it via the cascading foreign keys, atomically.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inspections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Checklist ────────────────────────────────────────────────────

    /// List an inspection's checklist in item-number order.
    pub async fn list_checklist(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Vec<ChecklistItem>, sqlx::Error> {
        let query = format!(
            "SELECT {CHECKLIST_COLUMNS} FROM checklist_items
             WHERE inspection_id = $1
             ORDER BY item_number ASC"
        );
        sqlx::query_as::<_, ChecklistItem>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }

    /// Update one checklist item. Items are freely re-editable; no
    /// ordering is enforced between item statuses.
    pub async fn update_checklist_item(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChecklistItem,
    ) -> Result<Option<ChecklistItem>, sqlx::Error> {
        let query = format!(
            "UPDATE checklist_items SET
                status = $1,
                comment = $2,
                reference = $3
             WHERE id = $4
             RETURNING {CHECKLIST_COLUMNS}"
        );
        sqlx::query_as::<_, ChecklistItem>(&query)
            .bind(&input.status)
            .bind(&input.comment)
            .bind(&input.reference)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a bulk checklist update in one transaction, then return the
    /// full refreshed checklist. Each entry must address an item of the
    /// given inspection; callers validate membership beforehand.
    pub async fn bulk_update_checklist(
        pool: &PgPool,
        inspection_id: DbId,
        items: &[BulkChecklistItem],
    ) -> Result<Vec<ChecklistItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for item in items {
            sqlx::query(
                "UPDATE checklist_items SET status = $1, comment = $2, reference = $3
                 WHERE id = $4 AND inspection_id = $5",
            )
            .bind(&item.status)
            .bind(&item.comment)
            .bind(&item.reference)
            .bind(item.id)
            .bind(inspection_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Self::list_checklist(pool, inspection_id).await
    }
}
