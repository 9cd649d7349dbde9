//! Handler for project image uploads.
//!
//! Accepts a multipart form with a required `file` field (JPEG, PNG, WebP or
//! GIF, at most 5MB) and an optional numeric `projectId`. The project id only
//! names the stored asset; the caller saves the returned URL with the project.

use axum::extract::{Multipart, State};
use axum::Json;
use folio_core::content::{check_image_upload, upload_public_id};
use folio_core::types::DbId;

use crate::assets::{ImageUpload, UploadedAsset};
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

struct FilePart {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// POST /api/upload
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedAsset>>> {
    let mut file: Option<FilePart> = None;
    let mut project_id: Option<DbId> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some(FilePart {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "projectId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let text = text.trim();
                if !text.is_empty() {
                    project_id = Some(super::parse_id(text, "Invalid project ID")?);
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("File is required".into()))?;
    check_image_upload(file.content_type.as_deref(), file.bytes.len())?;

    let public_id = upload_public_id(project_id, state.clock.now().timestamp_millis());
    let asset = state
        .assets
        .upload_image(ImageUpload {
            public_id,
            content_type: file.content_type.unwrap_or_default(),
            file_name: file.file_name,
            bytes: file.bytes,
        })
        .await?;

    Ok(Json(ApiResponse::data(asset)))
}
