//! Repository for the `notes` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, NoteFilter, UpdateNote};

const COLUMNS: &str = "id, slug, title, content, category, tags, created_at, updated_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// List notes newest first, optionally restricted to one category.
    pub async fn list(pool: &PgPool, filter: &NoteFilter) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE ($1::text IS NULL OR category = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&filter.category)
            .fetch_all(pool)
            .await
    }

    /// Distinct category values referenced by at least one note.
    pub async fn categories_in_use(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT DISTINCT category FROM notes ORDER BY category")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE slug = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn slug_taken(
        pool: &PgPool,
        slug: &str,
        excluding: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM notes WHERE slug = $1 AND ($2::bigint IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(excluding)
        .fetch_one(pool)
        .await
    }

    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (slug, title, content, category, tags)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                category = COALESCE($5, category),
                tags = COALESCE($6, tags)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
