//! Thickness measurement (TML) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

/// A row from the `thickness_measurements` table.
///
/// A measurement is "critical" when `t_measured` exists and is below
/// `t_alert`; that predicate is derived, never stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ThicknessMeasurement {
    pub id: DbId,
    pub inspection_id: DbId,
    pub tml_number: String,
    pub object_type: Option<String>,
    pub activity: Option<String>,
    pub dimension: Option<String>,
    pub t_nom: Option<f64>,
    pub t_ret: Option<f64>,
    pub t_alert: Option<f64>,
    pub t_measured: Option<f64>,
    pub position: Option<String>,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new measurement on an inspection.
#[derive(Debug, Deserialize)]
pub struct CreateThicknessMeasurement {
    pub tml_number: String,
    pub object_type: Option<String>,
    pub activity: Option<String>,
    pub dimension: Option<String>,
    pub t_nom: Option<f64>,
    pub t_ret: Option<f64>,
    pub t_alert: Option<f64>,
    pub t_measured: Option<f64>,
    pub position: Option<String>,
    pub comment: Option<String>,
}

/// DTO for updating an existing measurement.
#[derive(Debug, Deserialize)]
pub struct UpdateThicknessMeasurement {
    pub tml_number: Option<String>,
    pub object_type: Option<String>,
    pub activity: Option<String>,
    pub dimension: Option<String>,
    pub t_nom: Option<f64>,
    pub t_ret: Option<f64>,
    pub t_alert: Option<f64>,
    pub t_measured: Option<f64>,
    pub position: Option<String>,
    pub comment: Option<String>,
}
