//! Repository for the `note_categories` table.

use sqlx::PgPool;

use crate::models::category::{CreateNoteCategory, NoteCategory, UpdateNoteCategory};

const COLUMNS: &str = "id, name, description, icon, created_at, updated_at";

pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<NoteCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM note_categories ORDER BY name");
        sqlx::query_as::<_, NoteCategory>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<NoteCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM note_categories WHERE id = $1");
        sqlx::query_as::<_, NoteCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateNoteCategory,
    ) -> Result<NoteCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO note_categories (id, name, description, icon)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NoteCategory>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateNoteCategory,
    ) -> Result<Option<NoteCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE note_categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                icon = COALESCE($4, icon)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NoteCategory>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    /// Whether any note still references the category.
    pub async fn in_use(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM notes WHERE category = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM note_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
