//! Route definitions for the `/locations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{diagram, location};
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/diagrams   -> list_by_location
/// POST   /{id}/diagrams   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(location::get_by_id)
                .put(location::update)
                .delete(location::delete),
        )
        .route(
            "/{id}/diagrams",
            get(diagram::list_by_location).post(diagram::create),
        )
}
