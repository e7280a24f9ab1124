//! Handlers for the `/terminals` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use isotrack_core::error::CoreError;
use isotrack_core::types::DbId;
use isotrack_db::models::terminal::{CreateTerminal, Terminal, UpdateTerminal};
use isotrack_db::repositories::TerminalRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/terminals
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Terminal>>> {
    let terminals = TerminalRepo::list(&state.pool).await?;
    Ok(Json(terminals))
}

/// POST /api/v1/terminals
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateTerminal>,
) -> AppResult<(StatusCode, Json<Terminal>)> {
    let terminal = TerminalRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(terminal)))
}

/// GET /api/v1/terminals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Terminal>> {
    let terminal = TerminalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Terminal",
            id,
        }))?;
    Ok(Json(terminal))
}

/// PUT /api/v1/terminals/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTerminal>,
) -> AppResult<Json<Terminal>> {
    let terminal = TerminalRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Terminal",
            id,
        }))?;
    Ok(Json(terminal))
}

/// DELETE /api/v1/terminals/{id}
///
/// Cascades to every location, diagram, annotation, inspection and
/// isolation plan beneath the terminal.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TerminalRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Terminal",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
