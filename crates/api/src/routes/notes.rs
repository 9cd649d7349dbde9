//! Route definitions for `/notes`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::config::ContentResource;
use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// ```text
/// GET    /             -> list (?category=)
/// GET    /categories   -> categories_in_use
/// GET    /{slug}       -> get_by_slug
/// POST   /             -> create   (mutation gate)
/// PUT    /{slug}       -> update   (mutation gate, segment is the numeric id)
/// DELETE /{slug}       -> delete   (mutation gate, segment is the numeric id)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(notes::list))
        .route("/categories", get(notes::categories_in_use))
        .route("/{slug}", get(notes::get_by_slug));

    let mutations = Router::new()
        .route("/", post(notes::create))
        .route("/{slug}", put(notes::update).delete(notes::delete));

    public.merge(super::mutation_gate(mutations, state, ContentResource::Notes))
}
