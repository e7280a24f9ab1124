//! Isolation point model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

/// Coordinate payload stored in the `geometry` JSONB column.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PointGeometry {
    pub x: f64,
    pub y: f64,
}

/// A row from the `isolation_points` table, with the three actor display
/// names joined in.
#[derive(Debug, Clone, FromRow)]
pub struct IsolationPointRow {
    pub id: DbId,
    pub plan_id: DbId,
    pub point_type: String,
    pub tag_number: String,
    pub description: Option<String>,
    pub sequence_number: i32,
    pub normal_position: Option<String>,
    pub isolated_position: Option<String>,
    pub geometry: serde_json::Value,
    pub color: String,
    pub status: String,
    pub isolated_by: Option<DbId>,
    pub isolated_at: Option<Timestamp>,
    pub verified_by: Option<DbId>,
    pub verified_at: Option<Timestamp>,
    pub restored_by: Option<DbId>,
    pub restored_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub isolated_by_name: Option<String>,
    pub verified_by_name: Option<String>,
    pub restored_by_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The point shape returned to callers: geometry decoded into discrete
/// `x` / `y` fields, actor names included.
#[derive(Debug, Clone, Serialize)]
pub struct IsolationPointView {
    pub id: DbId,
    pub plan_id: DbId,
    pub point_type: String,
    pub tag_number: String,
    pub description: Option<String>,
    pub sequence_number: i32,
    pub normal_position: Option<String>,
    pub isolated_position: Option<String>,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub status: String,
    pub isolated_by: Option<DbId>,
    pub isolated_by_name: Option<String>,
    pub isolated_at: Option<Timestamp>,
    pub verified_by: Option<DbId>,
    pub verified_by_name: Option<String>,
    pub verified_at: Option<Timestamp>,
    pub restored_by: Option<DbId>,
    pub restored_by_name: Option<String>,
    pub restored_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<IsolationPointRow> for IsolationPointView {
    fn from(row: IsolationPointRow) -> Self {
        // Malformed geometry degrades to the origin rather than failing
        // the whole read.
        let geometry: PointGeometry =
            serde_json::from_value(row.geometry).unwrap_or_default();
        IsolationPointView {
            id: row.id,
            plan_id: row.plan_id,
            point_type: row.point_type,
            tag_number: row.tag_number,
            description: row.description,
            sequence_number: row.sequence_number,
            normal_position: row.normal_position,
            isolated_position: row.isolated_position,
            x: geometry.x,
            y: geometry.y,
            color: row.color,
            status: row.status,
            isolated_by: row.isolated_by,
            isolated_by_name: row.isolated_by_name,
            isolated_at: row.isolated_at,
            verified_by: row.verified_by,
            verified_by_name: row.verified_by_name,
            verified_at: row.verified_at,
            restored_by: row.restored_by,
            restored_by_name: row.restored_by_name,
            restored_at: row.restored_at,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for adding a point to a plan.
#[derive(Debug, Deserialize)]
pub struct CreateIsolationPoint {
    pub point_type: String,
    pub tag_number: String,
    pub geometry: PointGeometry,
    pub description: Option<String>,
    pub sequence_number: Option<i32>,
    pub normal_position: Option<String>,
    pub isolated_position: Option<String>,
    pub color: Option<String>,
    pub notes: Option<String>,
}

/// DTO for the free-form point edit.
///
/// Status, actor and timestamp fields are deliberately absent; those are
/// mutated only by the isolate/verify/restore operations.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateIsolationPoint {
    pub point_type: Option<String>,
    pub tag_number: Option<String>,
    pub description: Option<String>,
    pub sequence_number: Option<i32>,
    pub normal_position: Option<String>,
    pub isolated_position: Option<String>,
    pub geometry: Option<PointGeometry>,
    pub color: Option<String>,
    pub notes: Option<String>,
}
