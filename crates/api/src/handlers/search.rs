//! Handlers for full-text search and the tag index.

use axum::extract::{Query, State};
use axum::Json;
use folio_core::content::{normalize_query, SearchScope};
use folio_db::models::search::SearchResults;
use folio_db::repositories::SearchRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub scope: Option<String>,
}

/// GET /api/search?q=&type=all|posts|notes
///
/// Case-insensitive substring match. Unpublished posts are never returned.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<SearchResults>>> {
    let query = normalize_query(params.q.as_deref())?;
    let scope = match params.scope.as_deref() {
        Some(raw) => raw.parse::<SearchScope>()?,
        None => SearchScope::default(),
    };

    let results = SearchRepo::search(&state.pool, &query, scope).await?;
    tracing::debug!(
        posts = results.posts.len(),
        notes = results.notes.len(),
        "Search complete"
    );
    Ok(Json(ApiResponse::data(results)))
}

/// GET /api/search/tags
///
/// Sorted, de-duplicated tags across all posts.
pub async fn tags(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let tags = SearchRepo::post_tags(&state.pool).await?;
    Ok(Json(ApiResponse::data(tags)))
}
