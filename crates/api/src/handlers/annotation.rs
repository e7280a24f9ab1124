//! Handlers for the `/annotations` resource (nested under diagrams).
//!
//! Reads of a single annotation carry the computed `suggested_status`
//! alongside the stored status; the stored field is never overwritten by
//! the system.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use isotrack_core::error::CoreError;
use isotrack_core::lifecycle::InspectionOutcome;
use isotrack_core::suggestion::suggested_status;
use isotrack_core::types::DbId;
use isotrack_db::models::annotation::{
    Annotation, AnnotationWithSuggestion, CreateAnnotation, UpdateAnnotation,
};
use isotrack_db::repositories::{AnnotationRepo, DiagramRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/diagrams/{diagram_id}/annotations
pub async fn list_by_diagram(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(diagram_id): Path<DbId>,
) -> AppResult<Json<Vec<Annotation>>> {
    let annotations = AnnotationRepo::list_by_diagram(&state.pool, diagram_id).await?;
    Ok(Json(annotations))
}

/// POST /api/v1/diagrams/{diagram_id}/annotations
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(diagram_id): Path<DbId>,
    Json(input): Json<CreateAnnotation>,
) -> AppResult<(StatusCode, Json<Annotation>)> {
    DiagramRepo::find_by_id(&state.pool, diagram_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Diagram",
            id: diagram_id,
        }))?;

    let annotation = AnnotationRepo::create(&state.pool, diagram_id, &input).await?;
    Ok((StatusCode::CREATED, Json(annotation)))
}

/// GET /api/v1/annotations/{id}
///
/// Returns the annotation with its derived status suggestion.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<AnnotationWithSuggestion>> {
    let annotation = AnnotationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Annotation",
            id,
        }))?;

    let (latest_outcome, has_critical) =
        AnnotationRepo::latest_outcome_and_critical(&state.pool, id).await?;

    let outcome = match latest_outcome {
        Some(code) => Some(code.parse::<InspectionOutcome>().map_err(|e| {
            AppError::InternalError(format!("Stored inspection outcome is invalid: {e}"))
        })?),
        None => None,
    };

    Ok(Json(AnnotationWithSuggestion {
        suggested_status: suggested_status(outcome, has_critical).as_str().to_string(),
        annotation,
    }))
}

/// PUT /api/v1/annotations/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnotation>,
) -> AppResult<Json<Annotation>> {
    let annotation = AnnotationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Annotation",
            id,
        }))?;
    Ok(Json(annotation))
}

/// DELETE /api/v1/annotations/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AnnotationRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Annotation",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
