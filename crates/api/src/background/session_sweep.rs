//! Periodic deletion of expired admin sessions.
//!
//! Expired sessions are already rejected (and lazily deleted) on access; this
//! job removes the ones nobody presents again.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::session::SessionAuthenticator;

/// Run the session sweep loop until `cancel` is triggered.
///
/// The first sweep runs immediately on start.
pub async fn run(auth: Arc<SessionAuthenticator>, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Session sweep job started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                match auth.sweep_expired().await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session sweep: removed expired sessions");
                    }
                    Ok(_) => tracing::debug!("Session sweep: nothing to remove"),
                    Err(e) => tracing::error!(error = %e, "Session sweep failed"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use folio_core::clock::ManualClock;
    use folio_core::config::StaticConfig;
    use folio_core::credentials::{CredentialStore, MemoryCredentialStore, SessionRecord};

    use crate::auth::password::PasswordHashConfig;

    #[tokio::test]
    async fn sweeps_then_stops_on_cancel() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let store = Arc::new(MemoryCredentialStore::new());
        for (hash, expires_at) in [("stale", now - TimeDelta::hours(1)), ("live", now + TimeDelta::hours(1))] {
            store
                .insert_session(&SessionRecord {
                    token_hash: hash.into(),
                    expires_at,
                    created_at: now - TimeDelta::days(1),
                })
                .await
                .unwrap();
        }
        let auth = Arc::new(SessionAuthenticator::new(
            store.clone(),
            Arc::new(StaticConfig::new()),
            Arc::new(ManualClock::new(now)),
            PasswordHashConfig::default(),
            TimeDelta::days(7),
        ));

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(auth, Duration::from_secs(3600), cancel.clone()));

        // The first tick fires immediately.
        for _ in 0..50 {
            if store.session_count().await == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.session_count().await, 1);
        assert!(store.find_session("live").await.unwrap().is_some());

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
