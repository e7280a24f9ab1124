//! Integration tests for inspections, checklists and measurements.
//!
//! Exercises the tracker invariants against a real database:
//! - Checklist seeding on inspection create
//! - Annotation date synchronization on create and update
//! - Clearable fields (explicit null vs omitted)
//! - Bulk checklist updates
//! - Latest-outcome inputs for the status suggestion

use sqlx::PgPool;

use isotrack_core::checklist::CHECKLIST_TEMPLATE;
use isotrack_db::models::annotation::CreateAnnotation;
use isotrack_db::models::checklist_item::{BulkChecklistItem, UpdateChecklistItem};
use isotrack_db::models::diagram::CreateDiagram;
use isotrack_db::models::inspection::{CreateInspection, UpdateInspection};
use isotrack_db::models::location::CreateLocation;
use isotrack_db::models::terminal::CreateTerminal;
use isotrack_db::models::thickness_measurement::CreateThicknessMeasurement;
use isotrack_db::repositories::{
    AnnotationRepo, DiagramRepo, InspectionRepo, LocationRepo, TerminalRepo,
    ThicknessMeasurementRepo,
};
use isotrack_core::types::DbId;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_annotation(pool: &PgPool) -> DbId {
    let terminal = TerminalRepo::create(
        pool,
        &CreateTerminal {
            name: "Terminal".to_string(),
            code: "TRM".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let location = LocationRepo::create(
        pool,
        terminal.id,
        &CreateLocation {
            name: "Location".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let diagram = DiagramRepo::create(
        pool,
        location.id,
        &CreateDiagram {
            name: "Diagram".to_string(),
            file_name: None,
            description: None,
        },
    )
    .await
    .unwrap();
    AnnotationRepo::create(
        pool,
        diagram.id,
        &CreateAnnotation {
            annotation_type: "pipe".to_string(),
            kks_number: "10PAB10BR001".to_string(),
            geometry: serde_json::json!([{"x": 0.0, "y": 0.0}]),
            color: None,
            stroke_width: None,
            description: None,
            material: None,
            diameter: None,
            status: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_inspection(date: &str, next: Option<&str>) -> CreateInspection {
    CreateInspection {
        report_number: None,
        inspection_date: date.parse().unwrap(),
        next_inspection_date: next.map(|d| d.parse().unwrap()),
        inspector_name: "R. Vos".to_string(),
        inspector_cert: Some("VT-2".to_string()),
        approver_name: None,
        approver_cert: None,
        overall_status: None,
        conclusion: None,
    }
}

fn new_measurement(tml: &str, t_alert: Option<f64>, t_measured: Option<f64>) -> CreateThicknessMeasurement {
    CreateThicknessMeasurement {
        tml_number: tml.to_string(),
        object_type: None,
        activity: None,
        dimension: None,
        t_nom: Some(8.0),
        t_ret: None,
        t_alert,
        t_measured,
        position: None,
        comment: None,
    }
}

// ---------------------------------------------------------------------------
// Test: Checklist seeding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_seeds_full_checklist(pool: PgPool) {
    let annotation_id = seed_annotation(&pool).await;
    let detail = InspectionRepo::create(&pool, annotation_id, &new_inspection("2026-04-01", None))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.inspection.overall_status, "pending"); // default
    assert_eq!(detail.checklist.len(), CHECKLIST_TEMPLATE.len());
    for (item, template) in detail.checklist.iter().zip(CHECKLIST_TEMPLATE.iter()) {
        assert_eq!(item.item_number, template.number);
        assert_eq!(item.item_name, template.name);
        assert_eq!(item.status, "na");
        assert!(item.comment.is_none());
    }
    assert!(detail.measurements.is_empty());
    assert!(detail.images.is_empty());
    assert!(detail.documents.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_on_missing_annotation_returns_none(pool: PgPool) {
    let result = InspectionRepo::create(&pool, 999_999, &new_inspection("2026-04-01", None))
        .await
        .unwrap();
    assert!(result.is_none());

    // The aborted create must not leave orphan checklist rows behind.
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM checklist_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

// ---------------------------------------------------------------------------
// Test: Annotation dates follow the inspection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_syncs_annotation_dates(pool: PgPool) {
    let annotation_id = seed_annotation(&pool).await;
    InspectionRepo::create(
        &pool,
        annotation_id,
        &new_inspection("2026-04-01", Some("2028-04-01")),
    )
    .await
    .unwrap()
    .unwrap();

    let annotation = AnnotationRepo::find_by_id(&pool, annotation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(annotation.last_inspection, Some("2026-04-01".parse().unwrap()));
    assert_eq!(annotation.next_inspection, Some("2028-04-01".parse().unwrap()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_resyncs_annotation_dates(pool: PgPool) {
    let annotation_id = seed_annotation(&pool).await;
    let detail = InspectionRepo::create(
        &pool,
        annotation_id,
        &new_inspection("2026-04-01", Some("2028-04-01")),
    )
    .await
    .unwrap()
    .unwrap();

    InspectionRepo::update(
        &pool,
        detail.inspection.id,
        &UpdateInspection {
            inspection_date: Some("2026-05-10".parse().unwrap()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let annotation = AnnotationRepo::find_by_id(&pool, annotation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(annotation.last_inspection, Some("2026-05-10".parse().unwrap()));
    // The next-inspection date was not part of the update and is kept.
    assert_eq!(annotation.next_inspection, Some("2028-04-01".parse().unwrap()));
}

// ---------------------------------------------------------------------------
// Test: Clearable fields distinguish null from omitted
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_clearable_fields(pool: PgPool) {
    let annotation_id = seed_annotation(&pool).await;
    let detail = InspectionRepo::create(&pool, annotation_id, &new_inspection("2026-04-01", None))
        .await
        .unwrap()
        .unwrap();
    let id = detail.inspection.id;

    // Omitted: inspector_cert keeps its value.
    let updated = InspectionRepo::update(
        &pool,
        id,
        &UpdateInspection {
            conclusion: Some(Some("No findings".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.inspector_cert.as_deref(), Some("VT-2"));
    assert_eq!(updated.conclusion.as_deref(), Some("No findings"));

    // Explicit null: inspector_cert is cleared, conclusion untouched.
    let updated = InspectionRepo::update(
        &pool,
        id,
        &UpdateInspection {
            inspector_cert: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(updated.inspector_cert.is_none());
    assert_eq!(updated.conclusion.as_deref(), Some("No findings"));
}

// ---------------------------------------------------------------------------
// Test: Checklist item updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_single_checklist_item(pool: PgPool) {
    let annotation_id = seed_annotation(&pool).await;
    let detail = InspectionRepo::create(&pool, annotation_id, &new_inspection("2026-04-01", None))
        .await
        .unwrap()
        .unwrap();

    let item = &detail.checklist[0];
    let updated = InspectionRepo::update_checklist_item(
        &pool,
        item.id,
        &UpdateChecklistItem {
            status: "2".to_string(),
            comment: Some("Moderate pitting at support".to_string()),
            reference: Some("IMG-004".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.status, "2");
    assert_eq!(updated.comment.as_deref(), Some("Moderate pitting at support"));

    // The write is verbatim: a follow-up without comment clears it.
    let updated = InspectionRepo::update_checklist_item(
        &pool,
        item.id,
        &UpdateChecklistItem {
            status: "ok".to_string(),
            comment: None,
            reference: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "ok");
    assert!(updated.comment.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_checklist_update_is_scoped(pool: PgPool) {
    let annotation_id = seed_annotation(&pool).await;
    let first = InspectionRepo::create(&pool, annotation_id, &new_inspection("2026-04-01", None))
        .await
        .unwrap()
        .unwrap();
    let second = InspectionRepo::create(&pool, annotation_id, &new_inspection("2026-05-01", None))
        .await
        .unwrap()
        .unwrap();

    let foreign_item_id = second.checklist[0].id;
    let own_item_id = first.checklist[0].id;

    let refreshed = InspectionRepo::bulk_update_checklist(
        &pool,
        first.inspection.id,
        &[
            BulkChecklistItem {
                id: own_item_id,
                status: "1".to_string(),
                comment: None,
                reference: None,
            },
            BulkChecklistItem {
                id: foreign_item_id,
                status: "3".to_string(),
                comment: None,
                reference: None,
            },
        ],
    )
    .await
    .unwrap();

    assert_eq!(refreshed[0].status, "1");

    // The entry addressing another inspection's item is a no-op.
    let other = InspectionRepo::list_checklist(&pool, second.inspection.id)
        .await
        .unwrap();
    assert_eq!(other[0].status, "na");
}

// ---------------------------------------------------------------------------
// Test: Measurements and the suggestion inputs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_latest_outcome_and_critical(pool: PgPool) {
    let annotation_id = seed_annotation(&pool).await;

    // No inspections yet.
    let (outcome, critical) = AnnotationRepo::latest_outcome_and_critical(&pool, annotation_id)
        .await
        .unwrap();
    assert!(outcome.is_none());
    assert!(!critical);

    let older = InspectionRepo::create(&pool, annotation_id, &new_inspection("2026-01-01", None))
        .await
        .unwrap()
        .unwrap();
    let newer = InspectionRepo::create(&pool, annotation_id, &new_inspection("2026-06-01", None))
        .await
        .unwrap()
        .unwrap();

    InspectionRepo::update(
        &pool,
        older.inspection.id,
        &UpdateInspection {
            overall_status: Some("rejected".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    InspectionRepo::update(
        &pool,
        newer.inspection.id,
        &UpdateInspection {
            overall_status: Some("approved".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    // Only the latest inspection (by date) drives the suggestion inputs.
    let (outcome, critical) = AnnotationRepo::latest_outcome_and_critical(&pool, annotation_id)
        .await
        .unwrap();
    assert_eq!(outcome.as_deref(), Some("approved"));
    assert!(!critical);

    // A measurement below its alert threshold on the latest inspection
    // flips the critical flag.
    ThicknessMeasurementRepo::create(
        &pool,
        newer.inspection.id,
        &new_measurement("TML-01", Some(5.0), Some(4.2)),
    )
    .await
    .unwrap();
    let (_, critical) = AnnotationRepo::latest_outcome_and_critical(&pool, annotation_id)
        .await
        .unwrap();
    assert!(critical);

    // A critical measurement on the older inspection alone does not count.
    ThicknessMeasurementRepo::create(
        &pool,
        older.inspection.id,
        &new_measurement("TML-02", Some(5.0), Some(3.0)),
    )
    .await
    .unwrap();
    ThicknessMeasurementRepo::delete(
        &pool,
        ThicknessMeasurementRepo::list_by_inspection(&pool, newer.inspection.id)
            .await
            .unwrap()[0]
            .id,
    )
    .await
    .unwrap();
    let (outcome, critical) = AnnotationRepo::latest_outcome_and_critical(&pool, annotation_id)
        .await
        .unwrap();
    assert_eq!(outcome.as_deref(), Some("approved"));
    assert!(!critical);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_measurement_without_thresholds_is_not_critical(pool: PgPool) {
    let annotation_id = seed_annotation(&pool).await;
    let detail = InspectionRepo::create(&pool, annotation_id, &new_inspection("2026-04-01", None))
        .await
        .unwrap()
        .unwrap();

    // Measured but no alert threshold, and vice versa.
    ThicknessMeasurementRepo::create(
        &pool,
        detail.inspection.id,
        &new_measurement("TML-01", None, Some(4.2)),
    )
    .await
    .unwrap();
    ThicknessMeasurementRepo::create(
        &pool,
        detail.inspection.id,
        &new_measurement("TML-02", Some(5.0), None),
    )
    .await
    .unwrap();

    let (_, critical) = AnnotationRepo::latest_outcome_and_critical(&pool, annotation_id)
        .await
        .unwrap();
    assert!(!critical);
}

// ---------------------------------------------------------------------------
// Test: Inspection delete cascades to children
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_inspection_cascades(pool: PgPool) {
    let annotation_id = seed_annotation(&pool).await;
    let detail = InspectionRepo::create(&pool, annotation_id, &new_inspection("2026-04-01", None))
        .await
        .unwrap()
        .unwrap();
    ThicknessMeasurementRepo::create(
        &pool,
        detail.inspection.id,
        &new_measurement("TML-01", Some(5.0), Some(6.0)),
    )
    .await
    .unwrap();

    let deleted = InspectionRepo::delete(&pool, detail.inspection.id)
        .await
        .unwrap();
    assert!(deleted);

    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM checklist_items WHERE inspection_id = $1",
    )
    .bind(detail.inspection.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 0);

    // The annotation itself survives.
    assert!(AnnotationRepo::find_by_id(&pool, annotation_id)
        .await
        .unwrap()
        .is_some());
}
