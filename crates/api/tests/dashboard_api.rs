//! HTTP-level tests for the dashboard rollup endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, expect_status, get, post_json, TestApp};
use sqlx::PgPool;

async fn seed_annotation(app: &TestApp, token: &str, kind: &str, kks: &str) -> i64 {
    let terminal = body_json(
        post_json(
            app,
            "/api/v1/terminals",
            token,
            serde_json::json!({"name": "North", "code": format!("NT-{kks}")}),
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
    let diagram = body_json(
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
        .unwrap();
    body_json(
        post_json(
            app,
            &format!("/api/v1/diagrams/{diagram}/annotations"),
            token,
            serde_json::json!({
                "annotation_type": kind,
                "kks_number": kks,
                "geometry": [{"x": 1.0, "y": 2.0}],
            }),
        )
        .await,
    )
    .await["id"]
        .as_i64()
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_counts_reflect_seeded_entities(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    seed_annotation(&app, &token, "pipe", "1KKS01").await;
    seed_annotation(&app, &token, "tank", "1KKS02").await;

    let response = get(&app, "/api/v1/dashboard", &token).await;
    let json = expect_status(response, StatusCode::OK).await;

    // The rollup rides in the data envelope.
    let data = &json["data"];
    assert_eq!(data["counts"]["terminals"], 2);
    assert_eq!(data["counts"]["annotations"], 2);
    assert_eq!(data["counts"]["inspections"], 0);
    assert_eq!(data["annotation_statuses"]["not_inspected"], 2);
    assert_eq!(data["critical_measurements"], 0);
    assert!(data["upcoming"].as_array().unwrap().is_empty());
    assert!(data["overdue"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_filter_narrows_to_one_annotation_type(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    seed_annotation(&app, &token, "pipe", "1KKS01").await;
    seed_annotation(&app, &token, "tank", "1KKS02").await;

    let response = get(&app, "/api/v1/dashboard?annotation_type=pipe", &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["counts"]["annotations"], 1);
    assert_eq!(json["data"]["annotation_statuses"]["not_inspected"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn terminal_dashboard_scopes_to_one_terminal(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;
    seed_annotation(&app, &token, "pipe", "1KKS01").await;
    seed_annotation(&app, &token, "component", "1KKS02").await;

    let terminals = body_json(get(&app, "/api/v1/terminals", &token).await).await;
    let first = terminals.as_array().unwrap()[0]["id"].as_i64().unwrap();

    let response = get(&app, &format!("/api/v1/terminals/{first}/dashboard"), &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["terminal_id"].as_i64().unwrap(), first);
    assert_eq!(json["data"]["counts"]["terminals"], 1);
    assert_eq!(json["data"]["counts"]["annotations"], 1);
    assert_eq!(json["data"]["locations"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn terminal_dashboard_for_missing_terminal_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::auth_token(&app, "jane").await;

    let response = get(&app, "/api/v1/terminals/9999/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
