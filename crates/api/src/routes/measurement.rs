//! Route definitions for the flat-id `/measurements` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::measurement;
use crate::state::AppState;

/// Routes mounted at `/measurements`.
///
/// ```text
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(measurement::update).delete(measurement::delete),
    )
}
