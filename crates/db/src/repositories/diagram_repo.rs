//! Repository for the `diagrams` table.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::diagram::{CreateDiagram, Diagram, UpdateDiagram};

/// Column list for diagrams queries.
const COLUMNS: &str = "id, location_id, name, file_name, description, created_at, updated_at";

/// Provides CRUD operations for diagrams.
pub struct DiagramRepo;

impl DiagramRepo {
    /// Insert a new diagram under a location.
    pub async fn create(
        pool: &PgPool,
        location_id: DbId,
        input: &CreateDiagram,
    ) -> Result<Diagram, sqlx::Error> {
        let query = format!(
            "INSERT INTO diagrams (location_id, name, file_name, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Diagram>(&query)
            .bind(location_id)
            .bind(&input.name)
            .bind(&input.file_name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a diagram by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Diagram>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM diagrams WHERE id = $1");
        sqlx::query_as::<_, Diagram>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all diagrams for a location, ordered by name.
    pub async fn list_by_location(
        pool: &PgPool,
        location_id: DbId,
    ) -> Result<Vec<Diagram>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM diagrams WHERE location_id = $1 ORDER BY name ASC"
        );
        sqlx::query_as::<_, Diagram>(&query)
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    /// Update a diagram. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDiagram,
    ) -> Result<Option<Diagram>, sqlx::Error> {
        let query = format!(
            "UPDATE diagrams SET
                name = COALESCE($1, name),
                file_name = COALESCE($2, file_name),
                description = COALESCE($3, description)
             WHERE id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Diagram>(&query)
            .bind(&input.name)
            .bind(&input.file_name)
            .bind(&input.description)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Collect every stored file name that would be orphaned by deleting
    /// this diagram: the diagram PDF itself plus all inspection images and
    /// documents beneath it. Callers remove these via the file store before
    /// the row delete.
    pub async fn file_names_for_cleanup(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT file_name FROM diagrams WHERE id = $1 AND file_name IS NOT NULL
             UNION ALL
             SELECT ii.file_name
             FROM inspection_images ii
             JOIN inspections i ON i.id = ii.inspection_id
             JOIN annotations a ON a.id = i.annotation_id
             WHERE a.diagram_id = $1
             UNION ALL
             SELECT idoc.file_name
             FROM inspection_documents idoc
             JOIN inspections i ON i.id = idoc.inspection_id
             JOIN annotations a ON a.id = i.annotation_id
             WHERE a.diagram_id = $1",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    /// Delete a diagram. The foreign keys cascade to annotations,
    /// inspections, checklist items, measurements, images, documents,
    /// isolation plans and points. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM diagrams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
