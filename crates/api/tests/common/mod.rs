//! Shared helpers for API integration tests.
//!
//! Tests drive the real application router (same middleware stack as
//! production) through `tower::ServiceExt::oneshot`, without a TCP
//! listener. A seeded user + session provides the bearer token for
//! authenticated requests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use isotrack_api::auth::password::hash_password;
use isotrack_api::auth::session::{SessionStore, SessionUser};
use isotrack_api::config::ServerConfig;
use isotrack_api::router::build_app_router;
use isotrack_api::state::AppState;
use isotrack_api::storage::LocalFileStore;
use isotrack_core::lifecycle::GuardMode;
use isotrack_db::repositories::UserRepo;

/// A fully-wired application plus the state behind it.
///
/// The state is exposed so tests can seed sessions directly; the temp
/// upload directory lives as long as the app.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    /// Root of the app's file store, for on-disk assertions.
    pub upload_path: std::path::PathBuf,
    _upload_dir: tempfile::TempDir,
}

/// Build a test `ServerConfig` with safe defaults (strict guards).
pub fn test_config(upload_dir: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_mins: 60,
        guard_mode: GuardMode::Strict,
        upload_dir: upload_dir.to_string(),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors the construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_mode(pool, GuardMode::Strict)
}

/// Like [`build_test_app`] but with an explicit lifecycle guard mode.
pub fn build_test_app_with_mode(pool: PgPool, guard_mode: GuardMode) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("failed to create temp upload dir");

    let mut config = test_config(&upload_dir.path().to_string_lossy());
    config.guard_mode = guard_mode;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions: Arc::new(SessionStore::new(config.session_ttl_mins)),
        files: Arc::new(LocalFileStore::new(upload_dir.path())),
    };

    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
        upload_path: upload_dir.path().to_path_buf(),
        _upload_dir: upload_dir,
    }
}

/// Create a user and a live session, returning the bearer token.
pub async fn auth_token(app: &TestApp, username: &str) -> String {
    let hash = hash_password("a-sufficiently-long-pw").expect("hashing failed");
    let user = UserRepo::create(&app.state.pool, username, &hash, "Test User", "inspector")
        .await
        .expect("failed to seed user");

    app.state
        .sessions
        .issue(SessionUser {
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
        .await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &TestApp, request: Request<Body>) -> Response {
    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("request failed")
}

/// GET with bearer auth.
pub async fn get(app: &TestApp, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET without auth (health check, unauthorized cases).
pub async fn get_anon(app: &TestApp, path: &str) -> Response {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, request).await
}

/// POST a JSON body with bearer auth.
pub async fn post_json(
    app: &TestApp,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a JSON body without auth (login).
pub async fn post_json_anon(app: &TestApp, path: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST with bearer auth and an empty body (action endpoints).
pub async fn post_empty(app: &TestApp, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// PUT a JSON body with bearer auth.
pub async fn put_json(
    app: &TestApp,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method("PUT")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// DELETE with bearer auth.
pub async fn delete(app: &TestApp, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a single-file multipart form with bearer auth.
pub async fn post_multipart(
    app: &TestApp,
    path: &str,
    token: &str,
    file_name: &str,
    file_bytes: &[u8],
    extra_field: Option<(&str, &str)>,
) -> Response {
    let boundary = "isotrack-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"file\"; \
             filename=\"{file_name}\"\r\ncontent-type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(b"\r\n");
    if let Some((name, value)) = extra_field {
        body.extend_from_slice(
            format!("--{boundary}\r\ncontent-disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

/// Assert a status and return the parsed body for further checks.
pub async fn expect_status(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
