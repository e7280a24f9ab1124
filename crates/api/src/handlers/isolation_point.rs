//! Handlers for the `/isolation-points` resource (nested under plans).
//!
//! The three action endpoints (isolate, verify, restore) stamp the acting
//! user and run through the configured lifecycle guard.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use isotrack_core::error::CoreError;
use isotrack_core::lifecycle::{apply_point_action, PointAction, PointStatus};
use isotrack_core::types::DbId;
use isotrack_db::models::isolation_point::{
    CreateIsolationPoint, IsolationPointView, UpdateIsolationPoint,
};
use isotrack_db::repositories::IsolationPointRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/isolation-plans/{plan_id}/points
///
/// Sequence numbers are assigned automatically when omitted.
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(plan_id): Path<DbId>,
    Json(input): Json<CreateIsolationPoint>,
) -> AppResult<(StatusCode, Json<IsolationPointView>)> {
    let point = IsolationPointRepo::create(&state.pool, plan_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "IsolationPlan",
            id: plan_id,
        }))?;
    Ok((StatusCode::CREATED, Json(point)))
}

/// PUT /api/v1/isolation-points/{id}
///
/// Descriptive and geometric fields only; status is driven exclusively
/// by the action endpoints.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIsolationPoint>,
) -> AppResult<Json<IsolationPointView>> {
    let point = IsolationPointRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "IsolationPoint",
            id,
        }))?;
    Ok(Json(point))
}

/// DELETE /api/v1/isolation-points/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = IsolationPointRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "IsolationPoint",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/isolation-points/{id}/isolate
pub async fn isolate(
    state: State<AppState>,
    user: AuthUser,
    path: Path<DbId>,
) -> AppResult<Json<IsolationPointView>> {
    perform_action(state, user, path, PointAction::Isolate).await
}

/// POST /api/v1/isolation-points/{id}/verify
pub async fn verify(
    state: State<AppState>,
    user: AuthUser,
    path: Path<DbId>,
) -> AppResult<Json<IsolationPointView>> {
    perform_action(state, user, path, PointAction::Verify).await
}

/// POST /api/v1/isolation-points/{id}/restore
pub async fn restore(
    state: State<AppState>,
    user: AuthUser,
    path: Path<DbId>,
) -> AppResult<Json<IsolationPointView>> {
    perform_action(state, user, path, PointAction::Restore).await
}

/// Validate the transition under the configured guard mode, then write
/// the matching actor/timestamp stamp.
async fn perform_action(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    action: PointAction,
) -> AppResult<Json<IsolationPointView>> {
    let point = IsolationPointRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "IsolationPoint",
            id,
        }))?;

    let current: PointStatus = point.status.parse().map_err(|_| {
        AppError::InternalError(format!("Stored point status '{}' is invalid", point.status))
    })?;
    apply_point_action(state.config.guard_mode, current, action).map_err(AppError::Core)?;

    let updated = match action {
        PointAction::Isolate => {
            IsolationPointRepo::mark_isolated(&state.pool, id, user.user_id).await?
        }
        PointAction::Verify => {
            IsolationPointRepo::mark_verified(&state.pool, id, user.user_id).await?
        }
        PointAction::Restore => {
            IsolationPointRepo::mark_restored(&state.pool, id, user.user_id).await?
        }
    };

    let point = updated.ok_or(AppError::Core(CoreError::NotFound {
        entity: "IsolationPoint",
        id,
    }))?;
    Ok(Json(point))
}
