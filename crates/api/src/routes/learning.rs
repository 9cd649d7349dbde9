//! Route definitions for `/learning`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::config::ContentResource;
use crate::handlers::learning;
use crate::state::AppState;

/// Routes mounted at `/learning`.
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
        .route("/", get(learning::list))
        .route("/{id}", get(learning::get_by_id));

    let mutations = Router::new()
        .route("/", post(learning::create))
        .route("/{id}", put(learning::update).delete(learning::delete));

    public.merge(super::mutation_gate(mutations, state, ContentResource::Learning))
}
