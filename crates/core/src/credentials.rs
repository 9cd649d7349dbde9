//! Storage seam for the admin credential and admin sessions.
//!
//! [`CredentialStore`] is implemented over PostgreSQL in `folio-db`. The
//! [`MemoryCredentialStore`] here backs tests and the `memory` store backend.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::types::Timestamp;

/// The single admin's password hash (PHC string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredential {
    pub password_hash: String,
}

/// A persisted session. `token_hash` is the keyed hash of the cookie token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get_admin(&self) -> Result<Option<AdminCredential>, CoreError>;

    /// Store the admin credential unless one already exists.
    ///
    /// Returns `true` if this call created the record.
    async fn insert_admin_if_absent(&self, credential: &AdminCredential) -> Result<bool, CoreError>;

    async fn insert_session(&self, session: &SessionRecord) -> Result<(), CoreError>;

    async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>, CoreError>;

    /// Returns `true` if a session was removed. Deleting a missing session is not an error.
    async fn delete_session(&self, token_hash: &str) -> Result<bool, CoreError>;

    /// Remove every session with `expires_at <= now`. Returns the count removed.
    async fn delete_expired_sessions(&self, now: Timestamp) -> Result<u64, CoreError>;
}

/// Process-local credential store.
///
/// Sessions live in a sharded map, so the expiry sweep locks one shard at a
/// time. The admin credential sits behind its own mutex.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    admin: Mutex<Option<AdminCredential>>,
    sessions: DashMap<String, SessionRecord>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired or not.
    pub async fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_admin(&self) -> Result<Option<AdminCredential>, CoreError> {
        Ok(self.admin.lock().await.clone())
    }

    async fn insert_admin_if_absent(&self, credential: &AdminCredential) -> Result<bool, CoreError> {
        let mut admin = self.admin.lock().await;
        if admin.is_some() {
            return Ok(false);
        }
        *admin = Some(credential.clone());
        Ok(true)
    }

    async fn insert_session(&self, session: &SessionRecord) -> Result<(), CoreError> {
        match self.sessions.entry(session.token_hash.clone()) {
            Entry::Occupied(_) => Err(CoreError::Internal("duplicate session token".into())),
            Entry::Vacant(entry) => {
                entry.insert(session.clone());
                Ok(())
            }
        }
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>, CoreError> {
        Ok(self.sessions.get(token_hash).map(|entry| entry.value().clone()))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<bool, CoreError> {
        Ok(self.sessions.remove(token_hash).is_some())
    }

    async fn delete_expired_sessions(&self, now: Timestamp) -> Result<u64, CoreError> {
        let mut removed = 0u64;
        self.sessions.retain(|_, session| {
            let live = session.expires_at > now;
            if !live {
                removed += 1;
            }
            live
        });
        Ok(removed)
    }
}
