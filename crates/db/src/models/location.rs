//! Location model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

/// A row from the `locations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Location {
    pub id: DbId,
    pub terminal_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new location under a terminal.
#[derive(Debug, Deserialize)]
pub struct CreateLocation {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing location.
#[derive(Debug, Deserialize)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub description: Option<String>,
}
