//! Inspection model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

use crate::models::checklist_item::ChecklistItem;
use crate::models::inspection_file::{InspectionDocument, InspectionImage};
use crate::models::thickness_measurement::ThicknessMeasurement;

/// A row from the `inspections` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Inspection {
    pub id: DbId,
    pub annotation_id: DbId,
    pub report_number: Option<String>,
    pub inspection_date: NaiveDate,
    pub next_inspection_date: Option<NaiveDate>,
    pub inspector_name: String,
    pub inspector_cert: Option<String>,
    pub approver_name: Option<String>,
    pub approver_cert: Option<String>,
    pub overall_status: String,
    pub conclusion: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An inspection with all of its child collections.
#[derive(Debug, Serialize)]
pub struct InspectionDetail {
    #[serde(flatten)]
    pub inspection: Inspection,
    pub checklist: Vec<ChecklistItem>,
    pub measurements: Vec<ThicknessMeasurement>,
    pub images: Vec<InspectionImage>,
    pub documents: Vec<InspectionDocument>,
}

/// DTO for creating a new inspection on an annotation.
#[derive(Debug, Deserialize)]
pub struct CreateInspection {
    pub report_number: Option<String>,
    pub inspection_date: NaiveDate,
    pub next_inspection_date: Option<NaiveDate>,
    pub inspector_name: String,
    pub inspector_cert: Option<String>,
    pub approver_name: Option<String>,
    pub approver_cert: Option<String>,
    pub overall_status: Option<String>,
    pub conclusion: Option<String>,
}

/// DTO for updating an existing inspection.
///
/// Plain `Option` fields keep their prior value when omitted. The
/// double-`Option` fields are the ones the contract allows to be cleared:
/// omitted keeps the prior value, explicit `null` clears to NULL.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInspection {
    pub report_number: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub next_inspection_date: Option<Option<NaiveDate>>,
    pub inspector_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub inspector_cert: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub approver_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub approver_cert: Option<Option<String>>,
    pub overall_status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub conclusion: Option<Option<String>>,
}

/// Distinguish an omitted field from an explicit `null`.
///
/// With `#[serde(default)]`, an absent field stays `None`; a present field
/// (including `null`) becomes `Some(inner)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
