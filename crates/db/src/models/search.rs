//! Search result shapes.

use folio_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostHit {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NoteHit {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub category: String,
}

/// Combined response; a collection outside the requested scope stays empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub posts: Vec<PostHit>,
    pub notes: Vec<NoteHit>,
}
