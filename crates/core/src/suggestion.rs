//! Computed annotation-status suggestion.
//!
//! An annotation's stored `status` is set manually by inspectors and is
//! never overwritten by the system. This module derives a read-only
//! suggestion from the latest inspection outcome and the presence of
//! critical thickness measurements, so reads can surface both values side
//! by side. The two may legitimately disagree.

use crate::lifecycle::{AnnotationStatus, InspectionOutcome};

/// Derive a suggested annotation status.
///
/// Rules, in priority order:
/// 1. Any critical measurement on the latest inspection -> `critical`.
/// 2. Latest inspection `rejected` -> `critical`.
/// 3. Latest inspection `conditional` -> `warning`.
/// 4. Latest inspection `approved` -> `ok`.
/// 5. Latest inspection `pending` -> `warning` (work started, no verdict).
/// 6. No inspection at all -> `not_inspected`.
pub fn suggested_status(
    latest_outcome: Option<InspectionOutcome>,
    has_critical_measurement: bool,
) -> AnnotationStatus {
    match latest_outcome {
        None => AnnotationStatus::NotInspected,
        Some(_) if has_critical_measurement => AnnotationStatus::Critical,
        Some(InspectionOutcome::Rejected) => AnnotationStatus::Critical,
        Some(InspectionOutcome::Conditional) => AnnotationStatus::Warning,
        Some(InspectionOutcome::Approved) => AnnotationStatus::Ok,
        Some(InspectionOutcome::Pending) => AnnotationStatus::Warning,
    }
}
