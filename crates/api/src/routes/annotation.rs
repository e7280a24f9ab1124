//! Route definitions for the `/annotations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{annotation, inspection};
use crate::state::AppState;

/// Routes mounted at `/annotations`.
///
/// ```text
/// GET    /{id}               -> get_by_id (with suggested status)
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// GET    /{id}/inspections   -> list_by_annotation
/// POST   /{id}/inspections   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(annotation::get_by_id)
                .put(annotation::update)
                .delete(annotation::delete),
        )
        .route(
            "/{id}/inspections",
            get(inspection::list_by_annotation).post(inspection::create),
        )
}
