//! Text search over posts and notes, plus the post tag index.

use folio_core::content::{collect_unique_tags, like_pattern, SearchScope};
use sqlx::PgPool;

use crate::models::search::{NoteHit, PostHit, SearchResults};

pub struct SearchRepo;

impl SearchRepo {
    /// Case-insensitive substring search. Only published posts are returned.
    pub async fn search(
        pool: &PgPool,
        query: &str,
        scope: SearchScope,
    ) -> Result<SearchResults, sqlx::Error> {
        let pattern = like_pattern(query);
        let mut results = SearchResults::default();

        if scope.includes_posts() {
            results.posts = sqlx::query_as::<_, PostHit>(
                r"SELECT id, slug, title, excerpt, tags, published FROM posts
                  WHERE published
                    AND (title ILIKE $1 ESCAPE '\'
                         OR content ILIKE $1 ESCAPE '\'
                         OR excerpt ILIKE $1 ESCAPE '\'
                         OR array_to_string(tags, ' ') ILIKE $1 ESCAPE '\')
                  ORDER BY created_at DESC",
            )
            .bind(&pattern)
            .fetch_all(pool)
            .await?;
        }

        if scope.includes_notes() {
            results.notes = sqlx::query_as::<_, NoteHit>(
                r"SELECT id, slug, title, category FROM notes
                  WHERE title ILIKE $1 ESCAPE '\' OR content ILIKE $1 ESCAPE '\'
                  ORDER BY created_at DESC",
            )
            .bind(&pattern)
            .fetch_all(pool)
            .await?;
        }

        Ok(results)
    }

    /// Sorted unique tags across all posts.
    pub async fn post_tags(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<Vec<String>> = sqlx::query_scalar("SELECT tags FROM posts")
            .fetch_all(pool)
            .await?;
        Ok(collect_unique_tags(rows))
    }
}
