//! Handlers for the learning timeline.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::learning::{
    CreateLearningExperience, LearningExperience, UpdateLearningExperience,
};
use folio_db::repositories::LearningRepo;

use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::response::ApiResponse;
use crate::state::AppState;

const INVALID_ID: &str = "Invalid learning experience ID";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Learning experience",
        id: id.to_string(),
    })
}

/// GET /api/learning
///
/// Newest year first.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<LearningExperience>>>> {
    let entries = LearningRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(entries)))
}

/// GET /api/learning/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<LearningExperience>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let entry = LearningRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::data(entry)))
}

/// POST /api/learning
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateLearningExperience>,
) -> AppResult<(StatusCode, Json<ApiResponse<DbId>>)> {
    let entry = LearningRepo::create(&state.pool, &input).await?;
    tracing::info!(learning_id = entry.id, year = entry.year, "Learning experience created");
    Ok((StatusCode::CREATED, Json(ApiResponse::data(entry.id))))
}

/// PUT /api/learning/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(input): ValidJson<UpdateLearningExperience>,
) -> AppResult<Json<ApiResponse<DbId>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    LearningRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(learning_id = id, "Learning experience updated");
    Ok(Json(ApiResponse::data(id)))
}

/// DELETE /api/learning/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<DbId>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    if !LearningRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(learning_id = id, "Learning experience deleted");
    Ok(Json(ApiResponse::data(id)))
}
