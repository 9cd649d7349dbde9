//! Repository for the `admin_sessions` table.

use folio_core::types::Timestamp;
use sqlx::{FromRow, PgPool};

const COLUMNS: &str = "token_hash, expires_at, created_at";

/// A row from the `admin_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

pub struct SessionRepo;

impl SessionRepo {
    pub async fn insert(
        pool: &PgPool,
        token_hash: &str,
        expires_at: Timestamp,
        created_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO admin_sessions (token_hash, expires_at, created_at) VALUES ($1, $2, $3)",
        )
        .bind(token_hash)
        .bind(expires_at)
        .bind(created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find(pool: &PgPool, token_hash: &str) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_sessions WHERE token_hash = $1");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete sessions with `expires_at <= now`. Returns the number removed.
    pub async fn delete_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
