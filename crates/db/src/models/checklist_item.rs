//! Checklist item model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

/// A row from the `checklist_items` table.
///
/// Exists only as a child of exactly one inspection; the 19 items are
/// seeded when the inspection is created and never created independently.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChecklistItem {
    pub id: DbId,
    pub inspection_id: DbId,
    pub item_number: i32,
    pub item_name: String,
    pub status: String,
    pub comment: Option<String>,
    pub reference: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating a single checklist item.
#[derive(Debug, Deserialize)]
pub struct UpdateChecklistItem {
    pub status: String,
    pub comment: Option<String>,
    pub reference: Option<String>,
}

/// One entry of a bulk checklist update, matched by item id.
#[derive(Debug, Deserialize)]
pub struct BulkChecklistItem {
    pub id: DbId,
    pub status: String,
    pub comment: Option<String>,
    pub reference: Option<String>,
}
