//! Read-only rollup shapes for the dashboard endpoints.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use isotrack_core::types::{DbId, Timestamp};

/// Global entity counts.
#[derive(Debug, Default, Serialize, FromRow)]
pub struct EntityCounts {
    pub terminals: i64,
    pub locations: i64,
    pub diagrams: i64,
    pub annotations: i64,
    pub inspections: i64,
}

/// Annotation status histogram. The four buckets always sum to the
/// annotation total for the same scope and filter.
#[derive(Debug, Default, Serialize, FromRow)]
pub struct AnnotationStatusBreakdown {
    pub ok: i64,
    pub warning: i64,
    pub critical: i64,
    pub not_inspected: i64,
}

/// Inspection outcome histogram.
#[derive(Debug, Default, Serialize, FromRow)]
pub struct InspectionOutcomeBreakdown {
    pub approved: i64,
    pub conditional: i64,
    pub rejected: i64,
    pub pending: i64,
}

/// An annotation whose next inspection falls inside the lookahead window.
#[derive(Debug, Serialize, FromRow)]
pub struct UpcomingInspection {
    pub annotation_id: DbId,
    pub kks_number: String,
    pub annotation_type: String,
    pub diagram_id: DbId,
    pub diagram_name: String,
    pub terminal_name: String,
    pub next_inspection: NaiveDate,
    /// Calendar days from today until the due date.
    pub days_until: i32,
}

/// An annotation whose next inspection date has passed.
#[derive(Debug, Serialize, FromRow)]
pub struct OverdueInspection {
    pub annotation_id: DbId,
    pub kks_number: String,
    pub annotation_type: String,
    pub diagram_id: DbId,
    pub diagram_name: String,
    pub terminal_name: String,
    pub next_inspection: NaiveDate,
    /// Calendar days the inspection is overdue.
    pub days_overdue: i32,
}

/// An inspection created within the recency window.
#[derive(Debug, Serialize, FromRow)]
pub struct RecentInspection {
    pub id: DbId,
    pub annotation_id: DbId,
    pub kks_number: String,
    pub inspection_date: NaiveDate,
    pub overall_status: String,
    pub inspector_name: String,
    pub created_at: Timestamp,
}

/// Per-terminal annotation status breakdown.
#[derive(Debug, Serialize, FromRow)]
pub struct TerminalBreakdown {
    pub terminal_id: DbId,
    pub terminal_name: String,
    pub annotations: i64,
    pub ok: i64,
    pub warning: i64,
    pub critical: i64,
    pub not_inspected: i64,
}

/// Per-location annotation status breakdown.
#[derive(Debug, Serialize, FromRow)]
pub struct LocationBreakdown {
    pub location_id: DbId,
    pub location_name: String,
    pub annotations: i64,
    pub ok: i64,
    pub warning: i64,
    pub critical: i64,
    pub not_inspected: i64,
}

/// One month of the inspection-due timeline.
#[derive(Debug, Serialize, FromRow)]
pub struct TimelineMonth {
    /// Calendar month in `YYYY-MM` form.
    pub month: String,
    pub due: i64,
}

/// Full dashboard rollup, optionally filtered by annotation type.
#[derive(Debug, Serialize)]
pub struct DashboardRollup {
    pub counts: EntityCounts,
    pub annotation_statuses: AnnotationStatusBreakdown,
    pub inspection_outcomes: InspectionOutcomeBreakdown,
    pub upcoming: Vec<UpcomingInspection>,
    pub overdue: Vec<OverdueInspection>,
    pub recent: Vec<RecentInspection>,
    pub terminals: Vec<TerminalBreakdown>,
    pub critical_measurements: i64,
    pub timeline: Vec<TimelineMonth>,
}

/// Per-terminal rollup mirroring the dashboard shape.
#[derive(Debug, Serialize)]
pub struct TerminalRollup {
    pub terminal_id: DbId,
    pub counts: EntityCounts,
    pub annotation_statuses: AnnotationStatusBreakdown,
    pub inspection_outcomes: InspectionOutcomeBreakdown,
    pub upcoming: Vec<UpcomingInspection>,
    pub overdue: Vec<OverdueInspection>,
    pub recent: Vec<RecentInspection>,
    pub locations: Vec<LocationBreakdown>,
    pub critical_measurements: i64,
    pub timeline: Vec<TimelineMonth>,
}
