//! Session gate stage.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::cookie::session_token;
use crate::error::AppResult;
use crate::state::AppState;

/// Reject the request with 401 unless its cookie names a live session.
///
/// The session is looked up on every request; nothing is cached. Store
/// failures surface as 500.
pub async fn require_session(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> AppResult<Response> {
    let token = session_token(req.headers());
    state.auth.authenticate(token.as_deref()).await?;
    Ok(next.run(req).await)
}
