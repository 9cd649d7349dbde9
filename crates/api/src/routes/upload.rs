use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use folio_core::content::MAX_UPLOAD_BYTES;

use crate::handlers::upload;
use crate::state::AppState;

/// Headroom over the file limit for the multipart envelope and text fields.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/upload`.
///
/// ```text
/// POST /   -> upload_image   (session, then upload rate limit)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/", post(upload::upload_image))
        // Files just over the limit must still reach the handler's size check.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES));
    let routes = super::rate_limited(routes, state, &state.config.rate_limits.upload);
    // Session check runs before the upload limiter.
    super::session_required(routes, state)
}
