//! Repository for the `users` table.

use sqlx::PgPool;

use isotrack_core::types::DbId;

use crate::models::user::User;

/// Column list for users queries.
const COLUMNS: &str = "id, username, password_hash, full_name, role, is_active, \
    created_at, updated_at";

/// Provides lookup and creation for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with a pre-hashed password.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        full_name: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, full_name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(password_hash)
            .bind(full_name)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE username = $1 AND is_active = TRUE"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
