//! Diagram model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

/// A row from the `diagrams` table.
///
/// `file_name` references the stored PDF; the file itself lives in the
/// file store, not the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Diagram {
    pub id: DbId,
    pub location_id: DbId,
    pub name: String,
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new diagram under a location.
#[derive(Debug, Deserialize)]
pub struct CreateDiagram {
    pub name: String,
    pub file_name: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing diagram.
#[derive(Debug, Deserialize)]
pub struct UpdateDiagram {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub description: Option<String>,
}
