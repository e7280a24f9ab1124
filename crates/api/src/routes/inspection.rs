//! Route definitions for the `/inspections` resource and the flat-id
//! checklist-item, image and document routes.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{inspection, inspection_file, measurement};
use crate::state::AppState;

/// Routes mounted at `/inspections`.
///
/// ```text
/// GET    /{id}                -> get_by_id (full detail)
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// PUT    /{id}/checklist      -> bulk_update_checklist
/// POST   /{id}/measurements   -> measurement create
/// POST   /{id}/images         -> upload_image (multipart)
/// POST   /{id}/documents      -> upload_document (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(inspection::get_by_id)
                .put(inspection::update)
                .delete(inspection::delete),
        )
        .route("/{id}/checklist", put(inspection::bulk_update_checklist))
        .route("/{id}/measurements", post(measurement::create))
        .route("/{id}/images", post(inspection_file::upload_image))
        .route("/{id}/documents", post(inspection_file::upload_document))
}

/// Routes mounted at `/checklist-items`.
pub fn checklist_items_router() -> Router<AppState> {
    Router::new().route("/{id}", put(inspection::update_checklist_item))
}

/// Routes mounted at `/images`.
pub fn images_router() -> Router<AppState> {
    Router::new().route("/{id}", delete(inspection_file::delete_image))
}

/// Routes mounted at `/documents`.
pub fn documents_router() -> Router<AppState> {
    Router::new().route("/{id}", delete(inspection_file::delete_document))
}
