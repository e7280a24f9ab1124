//! Handlers for the `/diagrams` resource (nested under locations).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use isotrack_core::error::CoreError;
use isotrack_core::types::DbId;
use isotrack_db::models::diagram::{CreateDiagram, Diagram, UpdateDiagram};
use isotrack_db::repositories::{DiagramRepo, LocationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::storage::FILE_CATEGORIES;

/// GET /api/v1/locations/{location_id}/diagrams
pub async fn list_by_location(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(location_id): Path<DbId>,
) -> AppResult<Json<Vec<Diagram>>> {
    let diagrams = DiagramRepo::list_by_location(&state.pool, location_id).await?;
    Ok(Json(diagrams))
}

/// POST /api/v1/locations/{location_id}/diagrams
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(location_id): Path<DbId>,
    Json(input): Json<CreateDiagram>,
) -> AppResult<(StatusCode, Json<Diagram>)> {
    LocationRepo::find_by_id(&state.pool, location_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id: location_id,
        }))?;

    let diagram = DiagramRepo::create(&state.pool, location_id, &input).await?;
    Ok((StatusCode::CREATED, Json(diagram)))
}

/// GET /api/v1/diagrams/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Diagram>> {
    let diagram = DiagramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Diagram",
            id,
        }))?;
    Ok(Json(diagram))
}

/// PUT /api/v1/diagrams/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDiagram>,
) -> AppResult<Json<Diagram>> {
    let diagram = DiagramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Diagram",
            id,
        }))?;
    Ok(Json(diagram))
}

/// DELETE /api/v1/diagrams/{id}
///
/// Cascades through annotations down to inspection images and documents.
/// Stored files for the whole subtree are removed best-effort before the
/// row delete so an aborted delete cannot strand artifacts on disk with
/// no referencing row.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    DiagramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Diagram",
            id,
        }))?;

    // Names are unique per file so trying every category is harmless.
    let file_names = DiagramRepo::file_names_for_cleanup(&state.pool, id).await?;
    for name in &file_names {
        for category in FILE_CATEGORIES {
            state.files.delete(category, name).await;
        }
    }

    DiagramRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
