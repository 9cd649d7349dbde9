//! Handlers for blog posts.
//!
//! Reads address posts by slug; mutations address them by numeric id.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::post::{CreatePost, Post, PostFilter, UpdatePost};
use folio_db::repositories::PostRepo;

use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::response::ApiResponse;
use crate::state::AppState;

const INVALID_ID: &str = "Invalid post ID";
const DUPLICATE_SLUG: &str = "Post with this slug already exists";

fn not_found(id: impl ToString) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Post",
        id: id.to_string(),
    })
}

/// GET /api/posts
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PostFilter>,
) -> AppResult<Json<ApiResponse<Vec<Post>>>> {
    let posts = PostRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::data(posts)))
}

/// GET /api/posts/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<Post>>> {
    let post = PostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found(&slug))?;
    Ok(Json(ApiResponse::data(post)))
}

/// POST /api/posts
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreatePost>,
) -> AppResult<(StatusCode, Json<ApiResponse<DbId>>)> {
    if PostRepo::slug_taken(&state.pool, &input.slug, None).await? {
        return Err(AppError::BadRequest(DUPLICATE_SLUG.into()));
    }
    let post = PostRepo::create(&state.pool, &input).await?;
    tracing::info!(post_id = post.id, slug = %post.slug, "Post created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data_with_message(post.id, "Post created successfully")),
    ))
}

/// PUT /api/posts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(input): ValidJson<UpdatePost>,
) -> AppResult<Json<ApiResponse<DbId>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    if let Some(slug) = &input.slug {
        if PostRepo::slug_taken(&state.pool, slug, Some(id)).await? {
            return Err(AppError::BadRequest(DUPLICATE_SLUG.into()));
        }
    }
    PostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(post_id = id, "Post updated");
    Ok(Json(ApiResponse::data_with_message(id, "Post updated successfully")))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<DbId>>> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    if !PostRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(post_id = id, "Post deleted");
    Ok(Json(ApiResponse::data_with_message(id, "Post deleted successfully")))
}
