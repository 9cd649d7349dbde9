//! Session issuance, validation, and revocation for the single admin.
//!
//! Login flow:
//!
//! 1. `SESSION_SECRET` must be configured (else a configuration error).
//! 2. The candidate password must be 8..=255 characters.
//! 3. With no stored credential, the candidate is compared to the
//!    `ADMIN_PASSWORD` fallback; on a match it is hashed and stored, which
//!    bootstraps the credential exactly once.
//! 4. With a stored credential, the candidate is verified against its hash.
//! 5. On success a new random token is issued and its keyed hash persisted.

use std::sync::Arc;

use chrono::TimeDelta;
use folio_core::clock::Clock;
use folio_core::config::{ConfigProvider, ADMIN_PASSWORD, SESSION_SECRET};
use folio_core::credentials::{AdminCredential, CredentialStore, SessionRecord};
use folio_core::error::CoreError;
use folio_core::session::{generate_session_token, hash_session_token, is_expired};
use folio_core::types::Timestamp;
use folio_core::validation::validate_password;
use tokio::sync::Mutex;

use crate::auth::password::{constant_time_eq, hash_password, verify_password, PasswordHashConfig};

/// A session created by a successful login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Raw token for the cookie. Never persisted.
    pub token: String,
    pub expires_at: Timestamp,
}

pub struct SessionAuthenticator {
    store: Arc<dyn CredentialStore>,
    secrets: Arc<dyn ConfigProvider>,
    clock: Arc<dyn Clock>,
    hashing: PasswordHashConfig,
    session_ttl: TimeDelta,
    /// Serializes first-login bootstrap within this process.
    bootstrap: Mutex<()>,
}

impl SessionAuthenticator {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        secrets: Arc<dyn ConfigProvider>,
        clock: Arc<dyn Clock>,
        hashing: PasswordHashConfig,
        session_ttl: TimeDelta,
    ) -> Self {
        Self {
            store,
            secrets,
            clock,
            hashing,
            session_ttl,
            bootstrap: Mutex::new(()),
        }
    }

    pub fn session_ttl(&self) -> TimeDelta {
        self.session_ttl
    }

    /// Check `password` and, if it is the admin password, open a new session.
    pub async fn login(&self, password: &str) -> Result<IssuedSession, CoreError> {
        let secret = self.secrets.get_required(SESSION_SECRET)?;

        validate_password(password).map_err(|e| {
            CoreError::Validation(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid password".into()),
            )
        })?;

        let verified = match self.store.get_admin().await? {
            Some(admin) => self.verify(password, admin.password_hash).await?,
            None => self.bootstrap(password).await?,
        };
        if !verified {
            tracing::warn!("Admin login failed: wrong password");
            return Err(CoreError::InvalidCredential);
        }

        let token = generate_session_token(&secret);
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.session_ttl)
            .ok_or_else(|| CoreError::Internal("session expiry out of range".into()))?;

        self.store
            .insert_session(&SessionRecord {
                token_hash: token.hash,
                expires_at,
                created_at: now,
            })
            .await?;

        tracing::info!(%expires_at, "Admin session created");
        Ok(IssuedSession {
            token: token.plaintext,
            expires_at,
        })
    }

    /// First login with no stored credential.
    ///
    /// Returns `Ok(false)` when the candidate does not match the fallback.
    async fn bootstrap(&self, password: &str) -> Result<bool, CoreError> {
        let fallback = self.secrets.get_required(ADMIN_PASSWORD)?;
        if !constant_time_eq(password.as_bytes(), fallback.as_bytes()) {
            return Ok(false);
        }

        let _guard = self.bootstrap.lock().await;

        // Another login may have finished bootstrapping while we waited.
        if let Some(admin) = self.store.get_admin().await? {
            return self.verify(password, admin.password_hash).await;
        }

        let password_hash = self.hash(password).await?;
        let created = self
            .store
            .insert_admin_if_absent(&AdminCredential { password_hash })
            .await?;
        if created {
            tracing::info!("Admin credential bootstrapped from fallback password");
            return Ok(true);
        }

        // Lost the race to another process sharing the store.
        match self.store.get_admin().await? {
            Some(admin) => self.verify(password, admin.password_hash).await,
            None => Err(CoreError::Internal(
                "admin credential missing after bootstrap conflict".into(),
            )),
        }
    }

    async fn hash(&self, password: &str) -> Result<String, CoreError> {
        let password = password.to_owned();
        let config = self.hashing;
        tokio::task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .map_err(|e| CoreError::Internal(format!("password hashing task failed: {e}")))?
    }

    async fn verify(&self, password: &str, hash: String) -> Result<bool, CoreError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| CoreError::Internal(format!("password verification task failed: {e}")))?
    }

    /// Resolve a cookie token to a live session.
    ///
    /// Missing, unknown, and expired tokens are all `Unauthorized`; an expired
    /// session is deleted on the way out.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<SessionRecord, CoreError> {
        let token = token.ok_or_else(|| CoreError::Unauthorized("No session".into()))?;

        let Ok(secret) = self.secrets.get_required(SESSION_SECRET) else {
            tracing::error!("SESSION_SECRET is not set; rejecting session check");
            return Err(CoreError::Unauthorized("Invalid session".into()));
        };
        let token_hash = hash_session_token(&secret, token);

        let session = self
            .store
            .find_session(&token_hash)
            .await?
            .ok_or_else(|| CoreError::Unauthorized("Invalid session".into()))?;

        if is_expired(session.expires_at, self.clock.now()) {
            if let Err(e) = self.store.delete_session(&token_hash).await {
                tracing::warn!(error = %e, "Failed to delete expired session");
            }
            tracing::debug!("Rejected expired session");
            return Err(CoreError::Unauthorized("Session expired".into()));
        }

        Ok(session)
    }

    /// Revoke the session for `token`, if any. Never fails.
    pub async fn logout(&self, token: Option<&str>) {
        let Some(token) = token else {
            return;
        };
        let Ok(secret) = self.secrets.get_required(SESSION_SECRET) else {
            tracing::error!("SESSION_SECRET is not set; cannot revoke session");
            return;
        };
        match self.store.delete_session(&hash_session_token(&secret, token)).await {
            Ok(true) => tracing::info!("Admin session revoked"),
            Ok(false) => tracing::debug!("Logout for unknown session"),
            Err(e) => tracing::error!(error = %e, "Failed to delete session on logout"),
        }
    }

    /// Delete every expired session. Returns the number removed.
    pub async fn sweep_expired(&self) -> Result<u64, CoreError> {
        self.store.delete_expired_sessions(self.clock.now()).await
    }
}
