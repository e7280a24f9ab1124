//! Multipart upload handlers for inspection images and documents.
//!
//! Uploads accept a required `file` field plus an optional text field
//! (`caption` for images, `title` for documents). The file is written to
//! the store first and the row registered afterwards; a failed row insert
//! leaves at worst an orphaned file on disk.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use isotrack_core::error::CoreError;
use isotrack_core::types::DbId;
use isotrack_db::models::inspection_file::{
    CreateInspectionDocument, CreateInspectionImage, InspectionDocument, InspectionImage,
};
use isotrack_db::repositories::{InspectionDocumentRepo, InspectionImageRepo, InspectionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Supported image file extensions for upload.
const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Supported document file extensions for upload.
const SUPPORTED_DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx"];

/// POST /api/v1/inspections/{inspection_id}/images
pub async fn upload_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(inspection_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<InspectionImage>)> {
    ensure_inspection_exists(&state, inspection_id).await?;

    let (file_name, data, text) = read_upload(multipart).await?;
    check_extension(&file_name, SUPPORTED_IMAGE_EXTENSIONS)?;

    let stored_name = state.files.save("images", &file_name, &data).await?;

    let input = CreateInspectionImage {
        file_name: stored_name,
        caption: text,
    };
    let image = InspectionImageRepo::create(&state.pool, inspection_id, &input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// POST /api/v1/inspections/{inspection_id}/documents
pub async fn upload_document(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(inspection_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<InspectionDocument>)> {
    ensure_inspection_exists(&state, inspection_id).await?;

    let (file_name, data, text) = read_upload(multipart).await?;
    check_extension(&file_name, SUPPORTED_DOCUMENT_EXTENSIONS)?;

    let stored_name = state.files.save("documents", &file_name, &data).await?;

    let input = CreateInspectionDocument {
        file_name: stored_name,
        title: text,
    };
    let document = InspectionDocumentRepo::create(&state.pool, inspection_id, &input).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// DELETE /api/v1/images/{id}
pub async fn delete_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let image = InspectionImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InspectionImage",
            id,
        }))?;

    InspectionImageRepo::delete(&state.pool, id).await?;
    state.files.delete("images", &image.file_name).await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let document = InspectionDocumentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "InspectionDocument",
            id,
        }))?;

    InspectionDocumentRepo::delete(&state.pool, id).await?;
    state.files.delete("documents", &document.file_name).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_inspection_exists(state: &AppState, id: DbId) -> AppResult<()> {
    InspectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id,
        }))?;
    Ok(())
}

/// Pull the `file` field and the first auxiliary text field (`caption` or
/// `title`) out of a multipart form.
async fn read_upload(
    mut multipart: Multipart,
) -> AppResult<(String, Vec<u8>, Option<String>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((filename, data.to_vec()));
            }
            "caption" | "title" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                text = Some(value);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    Ok((file_name, data, text))
}

fn check_extension(file_name: &str, supported: &[&str]) -> AppResult<()> {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !supported.contains(&ext.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported file type '.{ext}'. Supported: {}",
            supported
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    Ok(())
}
