//! Route definitions for the global `/dashboard` rollup.
//!
//! The per-terminal variant lives under `/terminals/{id}/dashboard`.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard::global))
}
