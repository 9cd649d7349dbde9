//! Handlers for notes.
//!
//! Reads address notes by slug; mutations address them by numeric id.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::note::{CreateNote, Note, NoteFilter, UpdateNote};
use folio_db::repositories::NoteRepo;

use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::response::ApiResponse;
use crate::state::AppState;

const INVALID_ID: &str = "Invalid note ID";
const DUPLICATE_SLUG: &str = "Note with this slug already exists";

fn not_found(id: impl ToString) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Note",
        id: id.to_string(),
    })
}

/// GET /api/notes
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<NoteFilter>,
) -> AppResult<Json<ApiResponse<Vec<Note>>>> {
    let notes = NoteRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::data(notes)))
}

/// GET /api/notes/categories
///
/// Category values referenced by at least one note.
pub async fn categories_in_use(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let categories = NoteRepo::categories_in_use(&state.pool).await?;
    Ok(Json(ApiResponse::data(categories)))
}

/// GET /api/notes/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<Note>>> {
    let note = NoteRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    Ok(Json(ApiResponse::data(note)))
}

/// POST /api/notes
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateNote>,
) -> AppResult<(StatusCode, Json<ApiResponse<DbId>>)> {
    if NoteRepo::slug_taken(&state.pool, &input.slug, None).await? {
        return Err(AppError::BadRequest(DUPLICATE_SLUG.into()));
    }
    let note = NoteRepo::create(&state.pool, &input).await?;
    tracing::info!(note_id = note.id, slug = %note.slug, "Note created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data_with_message(note.id, "Note created successfully")),
    ))
}

/// PUT /api/notes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(input): ValidJson<UpdateNote>,
) -> AppResult<Json<ApiResponse<DbId>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    if let Some(slug) = &input.slug {
        if NoteRepo::slug_taken(&state.pool, slug, Some(id)).await? {
            return Err(AppError::BadRequest(DUPLICATE_SLUG.into()));
        }
    }
    NoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(note_id = id, "Note updated");
    Ok(Json(ApiResponse::data_with_message(id, "Note updated successfully")))
}

/// DELETE /api/notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<DbId>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    if !NoteRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(note_id = id, "Note deleted");
    Ok(Json(ApiResponse::data_with_message(id, "Note deleted successfully")))
}
