pub mod annotation;
pub mod auth;
pub mod dashboard;
pub mod diagram;
pub mod health;
pub mod inspection;
pub mod isolation_plan;
pub mod isolation_point;
pub mod location;
pub mod measurement;
pub mod terminal;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                 login (public)
/// /auth/logout                                logout (requires auth)
/// /auth/me                                    current user (requires auth)
///
/// /terminals                                  list, create
/// /terminals/{id}                             get, update, delete
/// /terminals/{id}/locations                   list, create
/// /terminals/{id}/dashboard                   terminal rollup (GET)
///
/// /locations/{id}                             get, update, delete
/// /locations/{id}/diagrams                    list, create
///
/// /diagrams/{id}                              get, update, delete
/// /diagrams/{id}/annotations                  list, create
/// /diagrams/{id}/isolation-plans              list, create
///
/// /annotations/{id}                           get (with suggestion), update, delete
/// /annotations/{id}/inspections               list, create
///
/// /inspections/{id}                           get detail, update, delete
/// /inspections/{id}/checklist                 bulk checklist update (PUT)
/// /inspections/{id}/measurements              add measurement (POST)
/// /inspections/{id}/images                    upload image (POST, multipart)
/// /inspections/{id}/documents                 upload document (POST, multipart)
///
/// /checklist-items/{id}                       update one item (PUT)
/// /measurements/{id}                          update, delete
/// /images/{id}                                delete
/// /documents/{id}                             delete
///
/// /isolation-plans                            list
/// /isolation-plans/active                     active plans (GET)
/// /isolation-plans/{id}                       get detail, update, delete
/// /isolation-plans/{id}/approve               approve (POST)
/// /isolation-plans/{id}/points                add point (POST)
///
/// /isolation-points/{id}                      update, delete
/// /isolation-points/{id}/isolate              mark isolated (POST)
/// /isolation-points/{id}/verify               mark verified (POST)
/// /isolation-points/{id}/restore              mark restored (POST)
///
/// /dashboard                                  global rollup (GET, ?annotation_type=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes.
        .nest("/auth", auth::router())
        // Terminal CRUD, nested locations and terminal dashboard.
        .nest("/terminals", terminal::router())
        // Location CRUD and nested diagrams.
        .nest("/locations", location::router())
        // Diagram CRUD, nested annotations and isolation plans.
        .nest("/diagrams", diagram::router())
        // Annotation CRUD and nested inspections.
        .nest("/annotations", annotation::router())
        // Inspection detail, checklist, measurements and uploads.
        .nest("/inspections", inspection::router())
        // Flat-id checklist item updates.
        .nest("/checklist-items", inspection::checklist_items_router())
        // Flat-id measurement updates.
        .nest("/measurements", measurement::router())
        // Flat-id image / document deletion.
        .nest("/images", inspection::images_router())
        .nest("/documents", inspection::documents_router())
        // Isolation plan registry.
        .nest("/isolation-plans", isolation_plan::router())
        // Flat-id isolation point operations.
        .nest("/isolation-points", isolation_point::router())
        // Global dashboard rollup.
        .nest("/dashboard", dashboard::router())
}
