//! Repository for the `locations` table.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::location::{CreateLocation, Location, UpdateLocation};

/// Column list for locations queries.
const COLUMNS: &str = "id, terminal_id, name, description, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location under a terminal.
    pub async fn create(
        pool: &PgPool,
        terminal_id: DbId,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (terminal_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(terminal_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a location by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all locations for a terminal, ordered by name.
    pub async fn list_by_terminal(
        pool: &PgPool,
        terminal_id: DbId,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations WHERE terminal_id = $1 ORDER BY name ASC"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(terminal_id)
            .fetch_all(pool)
            .await
    }

    /// Update a location. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = COALESCE($1, name),
                description = COALESCE($2, description)
             WHERE id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a location and, by cascade, its diagrams and their children.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
