//! Route definitions for the `/terminals` resource.
//!
//! Also nests locations and the per-terminal dashboard under
//! `/terminals/{id}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{dashboard, location, terminal};
use crate::state::AppState;

/// Routes mounted at `/terminals`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// GET    /{id}/locations      -> list_by_terminal
/// POST   /{id}/locations      -> create
/// GET    /{id}/dashboard      -> terminal rollup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(terminal::list).post(terminal::create))
        .route(
            "/{id}",
            get(terminal::get_by_id)
                .put(terminal::update)
                .delete(terminal::delete),
        )
        .route(
            "/{id}/locations",
            get(location::list_by_terminal).post(location::create),
        )
        .route("/{id}/dashboard", get(dashboard::terminal))
}
