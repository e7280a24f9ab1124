//! Repositories for the `inspection_images` and `inspection_documents` tables.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::inspection_file::{
    CreateInspectionDocument, CreateInspectionImage, InspectionDocument, InspectionImage,
};

/// Column list for inspection_images queries.
const IMAGE_COLUMNS: &str = "id, inspection_id, file_name, caption, created_at, updated_at";

/// Column list for inspection_documents queries.
const DOCUMENT_COLUMNS: &str = "id, inspection_id, file_name, title, created_at, updated_at";

/// Provides row registration for uploaded inspection images.
pub struct InspectionImageRepo;

impl InspectionImageRepo {
    /// Register a stored image file against an inspection.
    pub async fn create(
        pool: &PgPool,
        inspection_id: DbId,
        input: &CreateInspectionImage,
    ) -> Result<InspectionImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspection_images (inspection_id, file_name, caption)
             VALUES ($1, $2, $3)
             RETURNING {IMAGE_COLUMNS}"
        );
        sqlx::query_as::<_, InspectionImage>(&query)
            .bind(inspection_id)
            .bind(&input.file_name)
            .bind(&input.caption)
            .fetch_one(pool)
            .await
    }

    /// Find an image row by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InspectionImage>, sqlx::Error> {
        let query = format!("SELECT {IMAGE_COLUMNS} FROM inspection_images WHERE id = $1");
        sqlx::query_as::<_, InspectionImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an image row. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inspection_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Provides row registration for uploaded inspection documents.
pub struct InspectionDocumentRepo;

impl InspectionDocumentRepo {
    /// Register a stored document file against an inspection.
    pub async fn create(
        pool: &PgPool,
        inspection_id: DbId,
        input: &CreateInspectionDocument,
    ) -> Result<InspectionDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspection_documents (inspection_id, file_name, title)
             VALUES ($1, $2, $3)
             RETURNING {DOCUMENT_COLUMNS}"
        );
        sqlx::query_as::<_, InspectionDocument>(&query)
            .bind(inspection_id)
            .bind(&input.file_name)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find a document row by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InspectionDocument>, sqlx::Error> {
        let query = format!("SELECT {DOCUMENT_COLUMNS} FROM inspection_documents WHERE id = $1");
        sqlx::query_as::<_, InspectionDocument>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a document row. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inspection_documents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
