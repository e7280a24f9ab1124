//! Handlers for thickness measurements (nested under inspections).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use isotrack_core::error::CoreError;
use isotrack_core::types::DbId;
use isotrack_db::models::thickness_measurement::{
    CreateThicknessMeasurement, ThicknessMeasurement, UpdateThicknessMeasurement,
};
use isotrack_db::repositories::{InspectionRepo, ThicknessMeasurementRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/inspections/{inspection_id}/measurements
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(inspection_id): Path<DbId>,
    Json(input): Json<CreateThicknessMeasurement>,
) -> AppResult<(StatusCode, Json<ThicknessMeasurement>)> {
    InspectionRepo::find_by_id(&state.pool, inspection_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id: inspection_id,
        }))?;

    let measurement =
        ThicknessMeasurementRepo::create(&state.pool, inspection_id, &input).await?;
    Ok((StatusCode::CREATED, Json(measurement)))
}

/// PUT /api/v1/measurements/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateThicknessMeasurement>,
) -> AppResult<Json<ThicknessMeasurement>> {
    let measurement = ThicknessMeasurementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ThicknessMeasurement",
            id,
        }))?;
    Ok(Json(measurement))
}

/// DELETE /api/v1/measurements/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ThicknessMeasurementRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ThicknessMeasurement",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
