//! Repository for the singleton `admin_credential` row.

use sqlx::PgPool;

pub struct AdminRepo;

impl AdminRepo {
    pub async fn password_hash(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT password_hash FROM admin_credential WHERE singleton")
            .fetch_optional(pool)
            .await
    }

    /// Insert the credential unless one exists. Returns `true` if this call created it.
    pub async fn insert_if_absent(pool: &PgPool, password_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO admin_credential (singleton, password_hash)
             VALUES (TRUE, $1)
             ON CONFLICT (singleton) DO NOTHING",
        )
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
