//! Handlers for portfolio projects.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, Project, UpdateProject};
use folio_db::repositories::ProjectRepo;

use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::response::ApiResponse;
use crate::state::AppState;

const INVALID_ID: &str = "Invalid project ID";
const DUPLICATE_TITLE: &str = "Project with this title already exists";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id: id.to_string(),
    })
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(projects)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::data(project)))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ApiResponse<DbId>>)> {
    if ProjectRepo::title_taken(&state.pool, &input.title, None).await? {
        return Err(AppError::BadRequest(DUPLICATE_TITLE.into()));
    }
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, "Project created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data_with_message(
            project.id,
            "Project created successfully",
        )),
    ))
}

/// PUT /api/projects/{id}
///
/// An empty link string clears that link.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(input): ValidJson<UpdateProject>,
) -> AppResult<Json<ApiResponse<DbId>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    if let Some(title) = &input.title {
        if ProjectRepo::title_taken(&state.pool, title, Some(id)).await? {
            return Err(AppError::BadRequest(DUPLICATE_TITLE.into()));
        }
    }
    ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(project_id = id, "Project updated");
    Ok(Json(ApiResponse::data_with_message(
        id,
        "Project updated successfully",
    )))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<DbId>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(project_id = id, "Project deleted");
    Ok(Json(ApiResponse::data_with_message(
        id,
        "Project deleted successfully",
    )))
}
