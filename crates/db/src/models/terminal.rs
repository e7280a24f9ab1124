//! Terminal model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

/// A row from the `terminals` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Terminal {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new terminal.
#[derive(Debug, Deserialize)]
pub struct CreateTerminal {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

/// DTO for updating an existing terminal.
#[derive(Debug, Deserialize)]
pub struct UpdateTerminal {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
}
