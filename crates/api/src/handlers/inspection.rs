//! Handlers for the `/inspections` resource (nested under annotations),
//! including the per-inspection checklist.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use isotrack_core::error::CoreError;
use isotrack_core::types::DbId;
use isotrack_db::models::checklist_item::{BulkChecklistItem, ChecklistItem, UpdateChecklistItem};
use isotrack_db::models::inspection::{
    CreateInspection, Inspection, InspectionDetail, UpdateInspection,
};
use isotrack_db::repositories::InspectionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::storage::FILE_CATEGORIES;

/// GET /api/v1/annotations/{annotation_id}/inspections
pub async fn list_by_annotation(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(annotation_id): Path<DbId>,
) -> AppResult<Json<Vec<Inspection>>> {
    let inspections = InspectionRepo::list_by_annotation(&state.pool, annotation_id).await?;
    Ok(Json(inspections))
}

/// POST /api/v1/annotations/{annotation_id}/inspections
///
/// Creates the inspection with its full seeded checklist in one
/// transaction and resynchronizes the annotation's inspection dates.
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(annotation_id): Path<DbId>,
    Json(input): Json<CreateInspection>,
) -> AppResult<(StatusCode, Json<InspectionDetail>)> {
    let detail = InspectionRepo::create(&state.pool, annotation_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Annotation",
            id: annotation_id,
        }))?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/inspections/{id}
///
/// Full detail: checklist, measurements, images and documents.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<InspectionDetail>> {
    let detail = InspectionRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id,
        }))?;
    Ok(Json(detail))
}

/// PUT /api/v1/inspections/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInspection>,
) -> AppResult<Json<Inspection>> {
    let inspection = InspectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id,
        }))?;
    Ok(Json(inspection))
}

/// DELETE /api/v1/inspections/{id}
///
/// Checklist items, measurements and file rows cascade with the row.
/// Stored files are removed best-effort before the rows so an aborted
/// delete cannot strand artifacts on disk with no referencing row.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    InspectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id,
        }))?;

    let file_names = InspectionRepo::file_names_for_cleanup(&state.pool, id).await?;
    for name in &file_names {
        for category in FILE_CATEGORIES {
            state.files.delete(category, name).await;
        }
    }

    InspectionRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/checklist-items/{id}
pub async fn update_checklist_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChecklistItem>,
) -> AppResult<Json<ChecklistItem>> {
    let item = InspectionRepo::update_checklist_item(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ChecklistItem",
            id,
        }))?;
    Ok(Json(item))
}

/// PUT /api/v1/inspections/{id}/checklist
///
/// Bulk checklist update. Every entry must address an item of this
/// inspection; a foreign item id fails the whole request.
pub async fn bulk_update_checklist(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(items): Json<Vec<BulkChecklistItem>>,
) -> AppResult<Json<Vec<ChecklistItem>>> {
    let checklist = InspectionRepo::list_checklist(&state.pool, id).await?;
    if checklist.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id,
        }));
    }

    let member_ids: HashSet<DbId> = checklist.iter().map(|item| item.id).collect();
    for item in &items {
        if !member_ids.contains(&item.id) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Checklist item {} does not belong to inspection {id}",
                item.id
            ))));
        }
    }

    let updated = InspectionRepo::bulk_update_checklist(&state.pool, id, &items).await?;
    Ok(Json(updated))
}
