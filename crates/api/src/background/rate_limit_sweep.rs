//! Periodic removal of expired rate-limit windows.

use std::time::Duration;

use folio_core::rate_limit::RateLimiter;
use tokio_util::sync::CancellationToken;

/// Run the rate-limit sweep loop until `cancel` is triggered.
pub async fn run(limiter: RateLimiter, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Rate-limit sweep job started");

    let mut interval = tokio::time::interval(every);
    // The first tick completes immediately and there is nothing to sweep yet.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Rate-limit sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                let removed = limiter.sweep();
                tracing::debug!(
                    removed,
                    tracked = limiter.tracked_keys(),
                    "Rate-limit sweep complete"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{TimeDelta, TimeZone, Utc};
    use folio_core::clock::ManualClock;
    use folio_core::rate_limit::RateLimitPolicy;

    #[tokio::test(start_paused = true)]
    async fn expired_windows_are_dropped_each_interval() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        ));
        let limiter = RateLimiter::in_memory(clock.clone());
        let policy = RateLimitPolicy::mutation();
        limiter.admit("1.1.1.1", "/api/posts", &policy);
        limiter.admit("2.2.2.2", "/api/posts", &policy);
        assert_eq!(limiter.tracked_keys(), 2);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(limiter.clone(), Duration::from_secs(600), cancel.clone()));

        clock.advance(TimeDelta::minutes(2));
        tokio::time::sleep(Duration::from_secs(601)).await;
        assert_eq!(limiter.tracked_keys(), 0);

        cancel.cancel();
        handle.await.unwrap();
    }
}
