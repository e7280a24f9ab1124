//! Isolation plan model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

use crate::models::isolation_point::IsolationPointView;

/// A row from the `isolation_plans` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IsolationPlan {
    pub id: DbId,
    pub diagram_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub equipment_tag: Option<String>,
    pub work_order: Option<String>,
    pub status: String,
    pub planned_start: Option<Timestamp>,
    pub planned_end: Option<Timestamp>,
    pub actual_start: Option<Timestamp>,
    pub actual_end: Option<Timestamp>,
    pub point_size: i32,
    pub created_by: DbId,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A plan row with derived point counts, for list views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IsolationPlanSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub plan: IsolationPlan,
    pub point_count: i64,
    pub isolated_count: i64,
    pub verified_count: i64,
    pub restored_count: i64,
}

/// A single plan with creator/approver names and its points embedded.
#[derive(Debug, Serialize)]
pub struct IsolationPlanDetail {
    #[serde(flatten)]
    pub plan: IsolationPlan,
    pub created_by_name: Option<String>,
    pub approved_by_name: Option<String>,
    pub points: Vec<IsolationPointView>,
}

/// DTO for creating a new isolation plan on a diagram.
#[derive(Debug, Deserialize)]
pub struct CreateIsolationPlan {
    pub name: String,
    pub description: Option<String>,
    pub equipment_tag: Option<String>,
    pub work_order: Option<String>,
    pub planned_start: Option<Timestamp>,
    pub planned_end: Option<Timestamp>,
    pub point_size: Option<i32>,
}

/// DTO for updating an existing isolation plan.
///
/// `name`, `status` and `point_size` keep their prior value when omitted;
/// the descriptive and schedule fields are written verbatim, so omitting
/// them clears the column. Approval stamps are not updatable here; they
/// are written exactly once by the approval operation.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateIsolationPlan {
    pub name: Option<String>,
    pub status: Option<String>,
    pub point_size: Option<i32>,
    pub description: Option<String>,
    pub equipment_tag: Option<String>,
    pub work_order: Option<String>,
    pub planned_start: Option<Timestamp>,
    pub planned_end: Option<Timestamp>,
    pub actual_start: Option<Timestamp>,
    pub actual_end: Option<Timestamp>,
}
