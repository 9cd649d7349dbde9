//! Handlers for admin login, logout and session checks.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{cleared_session_cookie, session_cookie, session_token};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
///
/// Length rules are checked by the authenticator, after the server
/// configuration check.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Response> {
    let session = state.auth.login(&input.password).await?;

    let max_age = state.auth.session_ttl().num_seconds();
    let cookie = session_cookie(&session.token, max_age, state.config.production);

    Ok((
        [(SET_COOKIE, cookie)],
        Json(ApiResponse::message("Login successful")),
    )
        .into_response())
}

/// POST /api/auth/logout
///
/// Always succeeds and always clears the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = session_token(&headers);
    state.auth.logout(token.as_deref()).await;

    (
        [(SET_COOKIE, cleared_session_cookie(state.config.production))],
        Json(ApiResponse::message("Logout successful")),
    )
        .into_response()
}

/// GET /api/auth/check
///
/// 401 with `authenticated: false` for a missing, unknown or expired session.
pub async fn check(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = session_token(&headers);
    match state.auth.authenticate(token.as_deref()).await {
        Ok(_) => Json(ApiResponse::data(SessionStatus {
            authenticated: true,
        }))
        .into_response(),
        Err(CoreError::Unauthorized(reason)) => {
            tracing::debug!(%reason, "Session check failed");
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse {
                    success: false,
                    data: Some(SessionStatus {
                        authenticated: false,
                    }),
                    message: None,
                }),
            )
                .into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}
