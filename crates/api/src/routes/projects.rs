//! Route definitions for `/projects`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::config::ContentResource;
use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /       -> list
/// GET    /{id}   -> get_by_id
/// POST   /       -> create   (mutation gate)
/// PUT    /{id}   -> update   (mutation gate)
/// DELETE /{id}   -> delete   (mutation gate)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(projects::list))
        .route("/{id}", get(projects::get_by_id));

    let mutations = Router::new()
        .route("/", post(projects::create))
        .route("/{id}", put(projects::update).delete(projects::delete));

    public.merge(super::mutation_gate(mutations, state, ContentResource::Projects))
}
