//! Annotation model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

/// A row from the `annotations` table.
///
/// `geometry` is the encoded polyline payload (a JSON array of `{x, y}`
/// points) and is decoded only at the boundary. `status` is manually set
/// by inspectors and is never derived from inspection data;
/// `last_inspection` / `next_inspection` are overwritten whenever an
/// inspection is created or updated for this annotation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Annotation {
    pub id: DbId,
    pub diagram_id: DbId,
    pub annotation_type: String,
    pub kks_number: String,
    pub geometry: serde_json::Value,
    pub color: String,
    pub stroke_width: f64,
    pub description: Option<String>,
    pub material: Option<String>,
    pub diameter: Option<String>,
    pub last_inspection: Option<NaiveDate>,
    pub next_inspection: Option<NaiveDate>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An annotation plus the read-only computed status suggestion.
///
/// The stored `status` stays authoritative; `suggested_status` is derived
/// from the latest inspection outcome and critical measurements, and the
/// two may disagree.
#[derive(Debug, Serialize)]
pub struct AnnotationWithSuggestion {
    #[serde(flatten)]
    pub annotation: Annotation,
    pub suggested_status: String,
}

/// DTO for creating a new annotation on a diagram.
#[derive(Debug, Deserialize)]
pub struct CreateAnnotation {
    pub annotation_type: String,
    pub kks_number: String,
    pub geometry: serde_json::Value,
    pub color: Option<String>,
    pub stroke_width: Option<f64>,
    pub description: Option<String>,
    pub material: Option<String>,
    pub diameter: Option<String>,
    pub status: Option<String>,
}

/// DTO for updating an existing annotation.
///
/// Inspection-synchronized date fields are deliberately absent; they are
/// written only by inspection create/update.
#[derive(Debug, Deserialize)]
pub struct UpdateAnnotation {
    pub annotation_type: Option<String>,
    pub kks_number: Option<String>,
    pub geometry: Option<serde_json::Value>,
    pub color: Option<String>,
    pub stroke_width: Option<f64>,
    pub description: Option<String>,
    pub material: Option<String>,
    pub diameter: Option<String>,
    pub status: Option<String>,
}
