//! Background tasks and scheduled jobs.
//!
//! Each submodule provides a long-running async function intended to be
//! spawned via `tokio::spawn`. All tasks accept a [`CancellationToken`]
//! for graceful shutdown; [`BackgroundTasks`] owns the spawned handles.

pub mod rate_limit_sweep;
pub mod session_sweep;

use std::sync::Arc;
use std::time::Duration;

use folio_core::rate_limit::RateLimiter;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::auth::session::SessionAuthenticator;

/// How long [`BackgroundTasks::stop`] waits for each task to exit.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Running sweep tasks with a shared cancellation token.
pub struct BackgroundTasks {
    cancel: CancellationToken,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl BackgroundTasks {
    /// Spawn the session sweep and the rate-limit sweep.
    pub fn start(
        auth: Arc<SessionAuthenticator>,
        session_interval: Duration,
        limiter: RateLimiter,
        rate_limit_interval: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let handles = vec![
            (
                "session_sweep",
                tokio::spawn(session_sweep::run(auth, session_interval, cancel.clone())),
            ),
            (
                "rate_limit_sweep",
                tokio::spawn(rate_limit_sweep::run(
                    limiter,
                    rate_limit_interval,
                    cancel.clone(),
                )),
            ),
        ];
        Self { cancel, handles }
    }

    /// Cancel every task and wait (bounded) for each to finish.
    pub async fn stop(self) {
        self.cancel.cancel();
        for (name, handle) in self.handles {
            match tokio::time::timeout(STOP_TIMEOUT, handle).await {
                Ok(Ok(())) => tracing::debug!(task = name, "Background task stopped"),
                Ok(Err(e)) => tracing::error!(task = name, error = %e, "Background task panicked"),
                Err(_) => tracing::warn!(task = name, "Background task did not stop in time"),
            }
        }
    }
}
