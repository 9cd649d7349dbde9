//! Route definitions for `/categories`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::config::ContentResource;
use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
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
        .route("/", get(categories::list))
        .route("/{id}", get(categories::get_by_id));

    let mutations = Router::new()
        .route("/", post(categories::create))
        .route("/{id}", put(categories::update).delete(categories::delete));

    public.merge(super::mutation_gate(mutations, state, ContentResource::Categories))
}
