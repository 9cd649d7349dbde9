//! Route definitions for `/auth`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login   -> login   (login rate limit)
/// POST /logout  -> logout
/// GET  /check   -> check
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let login = super::rate_limited(
        Router::new().route("/login", post(auth::login)),
        state,
        &state.config.rate_limits.login,
    );

    Router::new()
        .route("/logout", post(auth::logout))
        .route("/check", get(auth::check))
        .merge(login)
}
