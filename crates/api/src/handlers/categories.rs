//! Handlers for note categories. Categories are keyed by a string id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_db::models::category::{CreateNoteCategory, NoteCategory, UpdateNoteCategory};
use folio_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::response::ApiResponse;
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id: id.to_string(),
    })
}

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<NoteCategory>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(categories)))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<NoteCategory>>> {
    let category = CategoryRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(ApiResponse::data(category)))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateNoteCategory>,
) -> AppResult<(StatusCode, Json<ApiResponse<NoteCategory>>)> {
    if CategoryRepo::find_by_id(&state.pool, &input.id).await?.is_some() {
        return Err(AppError::BadRequest(
            "Category with this ID already exists".into(),
        ));
    }
    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = %category.id, "Category created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data_with_message(
            category,
            "Category created successfully",
        )),
    ))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<UpdateNoteCategory>,
) -> AppResult<Json<ApiResponse<NoteCategory>>> {
    let category = CategoryRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| not_found(&id))?;
    tracing::info!(category_id = %id, "Category updated");
    Ok(Json(ApiResponse::data_with_message(
        category,
        "Category updated successfully",
    )))
}

/// DELETE /api/categories/{id}
///
/// Refused while any note still uses the category.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<String>>> {
    if CategoryRepo::in_use(&state.pool, &id).await? {
        return Err(AppError::BadRequest(
            "Category is still in use by notes".into(),
        ));
    }
    if !CategoryRepo::delete(&state.pool, &id).await? {
        return Err(not_found(&id));
    }
    tracing::info!(category_id = %id, "Category deleted");
    Ok(Json(ApiResponse::data_with_message(
        id,
        "Category deleted successfully",
    )))
}
