//! Route definitions for the `/isolation-plans` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{isolation_plan, isolation_point};
use crate::state::AppState;

/// Routes mounted at `/isolation-plans`.
///
/// ```text
/// GET    /              -> list
/// GET    /active        -> list_active
/// GET    /{id}          -> get_by_id (full detail)
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// POST   /{id}/approve  -> approve
/// POST   /{id}/points   -> point create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(isolation_plan::list))
        .route("/active", get(isolation_plan::list_active))
        .route(
            "/{id}",
            get(isolation_plan::get_by_id)
                .put(isolation_plan::update)
                .delete(isolation_plan::delete),
        )
        .route("/{id}/approve", post(isolation_plan::approve))
        .route("/{id}/points", post(isolation_point::create))
}
