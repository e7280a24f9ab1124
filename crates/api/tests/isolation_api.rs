//! HTTP-level integration tests for isolation plans and points, including
//! lifecycle guarding in strict and lenient modes.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, expect_status, get, post_empty, post_json, put_json, TestApp};
use sqlx::PgPool;

use isotrack_core::lifecycle::GuardMode;

/// Create terminal -> location -> diagram and return the diagram id.
async fn seed_diagram(app: &TestApp, token: &str) -> i64 {
    let terminal = body_json(
        post_json(
            app,
            "/api/v1/terminals",
            token,
            serde_json::json!({"name": "North", "code": "NT-01"}),
        )
        .await,
    )
    .await["id"]
        .as_i64()
        .unwrap();

    let location = body_json(
        post_json(
            app,
            &format!("/api/v1/terminals/{terminal}/locations"),
            token,
            serde_json::json!({"name": "Pump House"}),
        )
        .await,
    )
    .await["id"]
        .as_i64()
        .unwrap();

    body_json(
        post_json(
            app,
            &format!("/api/v1/locations/{location}/diagrams"),
            token,
            serde_json::json!({"name": "P&ID 044"}),
        )
        .await,
    )
    .await["id"]
        .as_i64()
        .unwrap()
}

async fn seed_plan(app: &TestApp, token: &str, diagram: i64) -> i64 {
    let response = post_json(
        app,
        &format!("/api/v1/diagrams/{diagram}/isolation-plans"),
        token,
        serde_json::json!({"name": "Pump P-101 overhaul", "work_order": "WO-7421"}),
    )
    .await;
    expect_status(response, StatusCode::CREATED).await["id"]
        .as_i64()
        .unwrap()
}

async fn seed_point(app: &TestApp, token: &str, plan: i64, tag: &str) -> i64 {
    let response = post_json(
        app,
        &format!("/api/v1/isolation-plans/{plan}/points"),
        token,
        serde_json::json!({
            "point_type": "valve",
            "tag_number": tag,
            "geometry": {"x": 120.5, "y": 340.25},
        }),
    )
    .await;
    expect_status(response, StatusCode::CREATED).await["id"]
        .as_i64()
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn plan_create_starts_in_draft(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;

    let response = post_json(
        &app,
        &format!("/api/v1/diagrams/{diagram}/isolation-plans"),
        &token,
        serde_json::json!({"name": "Pump P-101 overhaul"}),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(json["status"], "draft");
    assert_eq!(json["point_size"], 22);
    assert!(json["approved_by"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn plan_create_rejects_blank_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;

    for name in ["", "   "] {
        let response = post_json(
            &app,
            &format!("/api/v1/diagrams/{diagram}/isolation-plans"),
            &token,
            serde_json::json!({"name": name}),
        )
        .await;
        let json = expect_status(response, StatusCode::BAD_REQUEST).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    let response = get(&app, &format!("/api/v1/diagrams/{diagram}/isolation-plans"), &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert!(json.as_array().unwrap().is_empty(), "nothing was stored");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn strict_mode_rejects_out_of_order_transition(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;
    let plan = seed_plan(&app, &token, diagram).await;

    // draft -> active skips approval.
    let response = put_json(
        &app,
        &format!("/api/v1/isolation-plans/{plan}"),
        &token,
        serde_json::json!({"status": "active"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The forward step is fine.
    let response = put_json(
        &app,
        &format!("/api/v1/isolation-plans/{plan}"),
        &token,
        serde_json::json!({"status": "pending_approval"}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "pending_approval");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn lenient_mode_applies_any_transition(pool: PgPool) {
    let app = common::build_test_app_with_mode(pool, GuardMode::Lenient);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;
    let plan = seed_plan(&app, &token, diagram).await;

    let response = put_json(
        &app,
        &format!("/api/v1/isolation-plans/{plan}"),
        &token,
        serde_json::json!({"status": "completed"}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "completed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_status_code_is_rejected_in_both_modes(pool: PgPool) {
    let app = common::build_test_app_with_mode(pool, GuardMode::Lenient);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;
    let plan = seed_plan(&app, &token, diagram).await;

    let response = put_json(
        &app,
        &format!("/api/v1/isolation-plans/{plan}"),
        &token,
        serde_json::json!({"status": "abandoned"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approve_stamps_exactly_once(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;
    let plan = seed_plan(&app, &token, diagram).await;

    put_json(
        &app,
        &format!("/api/v1/isolation-plans/{plan}"),
        &token,
        serde_json::json!({"status": "pending_approval"}),
    )
    .await;

    let response = post_empty(&app, &format!("/api/v1/isolation-plans/{plan}/approve"), &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "approved");
    assert!(json["approved_by"].is_number());
    assert!(json["approved_at"].is_string());

    // A second approval attempt is rejected before the stamp is touched.
    let response = post_empty(&app, &format!("/api/v1/isolation-plans/{plan}/approve"), &token).await;
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::CONFLICT
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approve_from_draft_is_rejected_in_strict_mode(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;
    let plan = seed_plan(&app, &token, diagram).await;

    let response = post_empty(&app, &format!("/api/v1/isolation-plans/{plan}/approve"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn point_action_chain_is_guarded(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;
    let plan = seed_plan(&app, &token, diagram).await;
    let point = seed_point(&app, &token, plan, "XV-1001").await;

    // Verifying a pending point is out of order.
    let response = post_empty(&app, &format!("/api/v1/isolation-points/{point}/verify"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // isolate -> verify -> restore stamps actor and timestamp each step.
    let response = post_empty(&app, &format!("/api/v1/isolation-points/{point}/isolate"), &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "isolated");
    assert!(json["isolated_by"].is_number());
    assert!(json["isolated_at"].is_string());
    assert_eq!(json["isolated_by_name"], "Test User");

    let response = post_empty(&app, &format!("/api/v1/isolation-points/{point}/verify"), &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "verified");

    let response = post_empty(&app, &format!("/api/v1/isolation-points/{point}/restore"), &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "restored");
    assert!(json["restored_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn plan_detail_embeds_points_in_sequence_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;
    let plan = seed_plan(&app, &token, diagram).await;
    seed_point(&app, &token, plan, "XV-1001").await;
    seed_point(&app, &token, plan, "XV-1002").await;

    let response = get(&app, &format!("/api/v1/isolation-plans/{plan}"), &token).await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["created_by_name"], "Test User");
    let points = json["points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["sequence_number"], 1);
    assert_eq!(points[0]["tag_number"], "XV-1001");
    assert_eq!(points[1]["sequence_number"], 2);
    // Geometry is flattened into x/y for the client.
    assert_eq!(points[0]["x"], 120.5);
    assert_eq!(points[0]["y"], 340.25);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn active_list_tracks_live_isolations(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;
    let plan = seed_plan(&app, &token, diagram).await;
    seed_point(&app, &token, plan, "XV-1001").await;

    // Draft plan with pending points is not active.
    let response = get(&app, "/api/v1/isolation-plans/active", &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert!(json.as_array().unwrap().is_empty());

    // Walk it to active.
    for status in ["pending_approval", "approved", "active"] {
        if status == "approved" {
            post_empty(&app, &format!("/api/v1/isolation-plans/{plan}/approve"), &token).await;
        } else {
            put_json(
                &app,
                &format!("/api/v1/isolation-plans/{plan}"),
                &token,
                serde_json::json!({"status": status}),
            )
            .await;
        }
    }

    let response = get(&app, "/api/v1/isolation-plans/active", &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    let plans = json.as_array().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["id"].as_i64().unwrap(), plan);
    assert_eq!(plans[0]["point_count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn plan_delete_cascades_to_points(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    let diagram = seed_diagram(&app, &token).await;
    let plan = seed_plan(&app, &token, diagram).await;
    let point = seed_point(&app, &token, plan, "XV-1001").await;

    let response = delete(&app, &format!("/api/v1/isolation-plans/{plan}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = put_json(
        &app,
        &format!("/api/v1/isolation-points/{point}"),
        &token,
        serde_json::json!({"notes": "gone"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
