//! Repository for the `learning_experiences` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::learning::{
    CreateLearningExperience, LearningExperience, UpdateLearningExperience,
};

const COLUMNS: &str = "id, year, title, skills, created_at, updated_at";

pub struct LearningRepo;

impl LearningRepo {
    /// Most recent year first.
    pub async fn list(pool: &PgPool) -> Result<Vec<LearningExperience>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_experiences ORDER BY year DESC, created_at DESC"
        );
        sqlx::query_as::<_, LearningExperience>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LearningExperience>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learning_experiences WHERE id = $1");
        sqlx::query_as::<_, LearningExperience>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateLearningExperience,
    ) -> Result<LearningExperience, sqlx::Error> {
        let query = format!(
            "INSERT INTO learning_experiences (year, title, skills)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningExperience>(&query)
            .bind(input.year)
            .bind(&input.title)
            .bind(&input.skills)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLearningExperience,
    ) -> Result<Option<LearningExperience>, sqlx::Error> {
        let query = format!(
            "UPDATE learning_experiences SET
                year = COALESCE($2, year),
                title = COALESCE($3, title),
                skills = COALESCE($4, skills)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningExperience>(&query)
            .bind(id)
            .bind(input.year)
            .bind(&input.title)
            .bind(&input.skills)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM learning_experiences WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
