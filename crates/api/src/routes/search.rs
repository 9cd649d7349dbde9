use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Routes mounted at `/search`.
///
/// ```text
/// GET /       -> search (?q=, ?type=all|posts|notes)
/// GET /tags   -> tags
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search::search))
        .route("/tags", get(search::tags))
}
