//! Route definitions for the flat-id `/isolation-points` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::isolation_point;
use crate::state::AppState;

/// Routes mounted at `/isolation-points`.
///
/// ```text
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// POST   /{id}/isolate  -> isolate
/// POST   /{id}/verify   -> verify
/// POST   /{id}/restore  -> restore
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            put(isolation_point::update).delete(isolation_point::delete),
        )
        .route("/{id}/isolate", post(isolation_point::isolate))
        .route("/{id}/verify", post(isolation_point::verify))
        .route("/{id}/restore", post(isolation_point::restore))
}
