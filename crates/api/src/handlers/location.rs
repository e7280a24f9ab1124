//! Handlers for the `/locations` resource (nested under terminals).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use isotrack_core::error::CoreError;
use isotrack_core::types::DbId;
use isotrack_db::models::location::{CreateLocation, Location, UpdateLocation};
use isotrack_db::repositories::{LocationRepo, TerminalRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/terminals/{terminal_id}/locations
pub async fn list_by_terminal(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(terminal_id): Path<DbId>,
) -> AppResult<Json<Vec<Location>>> {
    let locations = LocationRepo::list_by_terminal(&state.pool, terminal_id).await?;
    Ok(Json(locations))
}

/// POST /api/v1/terminals/{terminal_id}/locations
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(terminal_id): Path<DbId>,
    Json(input): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    TerminalRepo::find_by_id(&state.pool, terminal_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Terminal",
            id: terminal_id,
        }))?;

    let location = LocationRepo::create(&state.pool, terminal_id, &input).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// GET /api/v1/locations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Location>> {
    let location = LocationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;
    Ok(Json(location))
}

/// PUT /api/v1/locations/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLocation>,
) -> AppResult<Json<Location>> {
    let location = LocationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;
    Ok(Json(location))
}

/// DELETE /api/v1/locations/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LocationRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
