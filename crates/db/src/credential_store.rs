//! PostgreSQL implementation of [`CredentialStore`].

use async_trait::async_trait;
use folio_core::credentials::{AdminCredential, CredentialStore, SessionRecord};
use folio_core::error::CoreError;
use folio_core::types::Timestamp;

use crate::repositories::session_repo::SessionRow;
use crate::repositories::{AdminRepo, SessionRepo};
use crate::DbPool;

/// Credential store over the `admin_credential` and `admin_sessions` tables.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: DbPool,
}

impl PgCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn store_error(op: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(error = %err, op, "Credential store query failed");
        CoreError::Internal(format!("credential store {op} failed: {err}"))
    }
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        Self {
            token_hash: row.token_hash,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn get_admin(&self) -> Result<Option<AdminCredential>, CoreError> {
        let hash = AdminRepo::password_hash(&self.pool)
            .await
            .map_err(store_error("get_admin"))?;
        Ok(hash.map(|password_hash| AdminCredential { password_hash }))
    }

    async fn insert_admin_if_absent(&self, credential: &AdminCredential) -> Result<bool, CoreError> {
        AdminRepo::insert_if_absent(&self.pool, &credential.password_hash)
            .await
            .map_err(store_error("insert_admin"))
    }

    async fn insert_session(&self, session: &SessionRecord) -> Result<(), CoreError> {
        SessionRepo::insert(
            &self.pool,
            &session.token_hash,
            session.expires_at,
            session.created_at,
        )
        .await
        .map_err(store_error("insert_session"))
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>, CoreError> {
        let row = SessionRepo::find(&self.pool, token_hash)
            .await
            .map_err(store_error("find_session"))?;
        Ok(row.map(SessionRecord::from))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<bool, CoreError> {
        SessionRepo::delete(&self.pool, token_hash)
            .await
            .map_err(store_error("delete_session"))
    }

    async fn delete_expired_sessions(&self, now: Timestamp) -> Result<u64, CoreError> {
        SessionRepo::delete_expired(&self.pool, now)
            .await
            .map_err(store_error("delete_expired_sessions"))
    }
}
