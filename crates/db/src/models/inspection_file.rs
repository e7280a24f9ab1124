//! Inspection image and document models.
//!
//! Rows reference stored files by name only; the bytes live in the file
//! store collaborator.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

/// A row from the `inspection_images` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InspectionImage {
    pub id: DbId,
    pub inspection_id: DbId,
    pub file_name: String,
    pub caption: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `inspection_documents` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InspectionDocument {
    pub id: DbId,
    pub inspection_id: DbId,
    pub file_name: String,
    pub title: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering an uploaded image against an inspection.
#[derive(Debug, Deserialize)]
pub struct CreateInspectionImage {
    pub file_name: String,
    pub caption: Option<String>,
}

/// DTO for registering an uploaded document against an inspection.
#[derive(Debug, Deserialize)]
pub struct CreateInspectionDocument {
    pub file_name: String,
    pub title: Option<String>,
}
