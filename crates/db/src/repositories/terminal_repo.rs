//! Repository for the `terminals` table.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::terminal::{CreateTerminal, Terminal, UpdateTerminal};

/// Column list for terminals queries.
const COLUMNS: &str = "id, name, code, description, created_at, updated_at";

/// Provides CRUD operations for terminals.
pub struct TerminalRepo;

impl TerminalRepo {
    /// Insert a new terminal. A reused `code` violates
    /// `uq_terminals_code` and surfaces as a database error.
    pub async fn create(pool: &PgPool, input: &CreateTerminal) -> Result<Terminal, sqlx::Error> {
        let query = format!(
            "INSERT INTO terminals (name, code, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Terminal>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a terminal by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Terminal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM terminals WHERE id = $1");
        sqlx::query_as::<_, Terminal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all terminals ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Terminal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM terminals ORDER BY name ASC");
        sqlx::query_as::<_, Terminal>(&query).fetch_all(pool).await
    }

    /// Update a terminal. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTerminal,
    ) -> Result<Option<Terminal>, sqlx::Error> {
        let query = format!(
            "UPDATE terminals SET
                name = COALESCE($1, name),
                code = COALESCE($2, code),
                description = COALESCE($3, description)
             WHERE id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Terminal>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.description)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a terminal and, by cascade, everything beneath it.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM terminals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
