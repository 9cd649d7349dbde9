pub mod auth;
pub mod categories;
pub mod health;
pub mod learning;
pub mod notes;
pub mod posts;
pub mod projects;
pub mod search;
pub mod upload;

use axum::middleware;
use axum::Router;
use folio_core::rate_limit::RateLimitPolicy;

use crate::config::{AuthRequirement, ContentResource};
use crate::middleware::rate_limit::{enforce_rate_limit, RateLimitGate};
use crate::middleware::session::require_session;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy and gates (RL = rate limit, S = session):
///
/// ```text
/// /auth/login                 POST           login RL
/// /auth/logout                POST           -
/// /auth/check                 GET            -
///
/// /posts                      GET | POST     - | mutation RL, S
/// /posts/{slug}               GET | PUT, DELETE (by id)
/// /notes                      GET | POST
/// /notes/categories           GET
/// /notes/{slug}               GET | PUT, DELETE (by id)
/// /categories                 GET | POST
/// /categories/{id}            GET | PUT, DELETE
/// /projects                   GET | POST
/// /projects/{id}              GET | PUT, DELETE
/// /learning                   GET | POST
/// /learning/{id}              GET | PUT, DELETE
///
/// /search                     GET (?q=&type=all|posts|notes)
/// /search/tags                GET
///
/// /upload                     POST           S, upload RL
/// ```
///
/// Whether content mutations require a session is decided per resource by
/// [`crate::config::MutationAuthPolicy`].
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/posts", posts::router(state))
        .nest("/notes", notes::router(state))
        .nest("/categories", categories::router(state))
        .nest("/projects", projects::router(state))
        .nest("/learning", learning::router(state))
        .nest("/search", search::router())
        .nest("/upload", upload::router(state))
}

/// Rate-limit stage for `policy`, keyed per client and request path.
fn rate_limited(
    router: Router<AppState>,
    state: &AppState,
    policy: &RateLimitPolicy,
) -> Router<AppState> {
    let gate = RateLimitGate::new(state.rate_limiter.clone(), policy.clone());
    router.route_layer(middleware::from_fn_with_state(gate, enforce_rate_limit))
}

fn session_required(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_session,
    ))
}

/// Gate content mutations: rate limit first, then the resource's auth
/// requirement, then the handler.
fn mutation_gate(
    router: Router<AppState>,
    state: &AppState,
    resource: ContentResource,
) -> Router<AppState> {
    let router = match state.config.mutation_auth.requirement(resource) {
        AuthRequirement::Session => session_required(router, state),
        AuthRequirement::Anonymous => router,
    };
    // Added last so it runs first.
    rate_limited(router, state, &state.config.rate_limits.mutation)
}
