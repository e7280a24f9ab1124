//! Route definitions for the `/diagrams` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{annotation, diagram, isolation_plan};
use crate::state::AppState;

/// Routes mounted at `/diagrams`.
///
/// ```text
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /{id}/annotations        -> list_by_diagram
/// POST   /{id}/annotations        -> create
/// GET    /{id}/isolation-plans    -> list_by_diagram
/// POST   /{id}/isolation-plans    -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(diagram::get_by_id)
                .put(diagram::update)
                .delete(diagram::delete),
        )
        .route(
            "/{id}/annotations",
            get(annotation::list_by_diagram).post(annotation::create),
        )
        .route(
            "/{id}/isolation-plans",
            get(isolation_plan::list_by_diagram).post(isolation_plan::create),
        )
}
