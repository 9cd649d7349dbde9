//! Route definitions for `/posts`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::config::ContentResource;
use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /         -> list (?tag=, ?published=)
/// GET    /{slug}   -> get_by_slug
/// POST   /         -> create   (mutation gate)
/// PUT    /{slug}   -> update   (mutation gate, segment is the numeric id)
/// DELETE /{slug}   -> delete   (mutation gate, segment is the numeric id)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(posts::list))
        .route("/{slug}", get(posts::get_by_slug));

    let mutations = Router::new()
        .route("/", post(posts::create))
        .route("/{slug}", put(posts::update).delete(posts::delete));

    public.merge(super::mutation_gate(mutations, state, ContentResource::Posts))
}
