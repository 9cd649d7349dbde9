//! Fixed-window request rate limiting.
//!
//! Every (client identity, route) pair gets its own counter. A window opens on
//! the first request, admits up to `max_requests` requests, and is replaced by
//! a fresh window on the first request at or after `reset_at`. Expired windows
//! are also dropped in bulk by [`RateLimiter::sweep`].
//!
//! State lives behind the [`RateLimitStore`] trait. The only implementation
//! shipped is [`MemoryRateLimitStore`], a sharded `DashMap`, so the limits are
//! per process.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::clock::Clock;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// Window length, request ceiling, and denial message for one route class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub window: Duration,
    pub max_requests: u32,
    pub message: String,
}

impl RateLimitPolicy {
    pub fn new(window: Duration, max_requests: u32, message: impl Into<String>) -> Self {
        Self {
            window,
            max_requests,
            message: message.into(),
        }
    }

    /// 5 attempts per 15 minutes.
    pub fn login() -> Self {
        Self::new(
            Duration::from_secs(15 * 60),
            5,
            "Too many login attempts, please try again in 15 minutes",
        )
    }

    /// 10 uploads per minute.
    pub fn upload() -> Self {
        Self::new(
            Duration::from_secs(60),
            10,
            "Too many uploads, please try again later",
        )
    }

    /// 30 content mutations per minute.
    pub fn mutation() -> Self {
        Self::new(
            Duration::from_secs(60),
            30,
            "Too many requests, please slow down",
        )
    }

    /// Replace the ceiling and window, keeping the message.
    #[must_use]
    pub fn with_limits(mut self, max_requests: u32, window: Duration) -> Self {
        self.max_requests = max_requests;
        self.window = window;
        self
    }
}

// ---------------------------------------------------------------------------
// Windows and storage
// ---------------------------------------------------------------------------

/// Counter state for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitWindow {
    pub count: u32,
    pub reset_at: Timestamp,
}

impl RateLimitWindow {
    /// A window counts requests only strictly before `reset_at`.
    pub fn is_current(&self, now: Timestamp) -> bool {
        now < self.reset_at
    }
}

/// Keyed storage for rate-limit windows.
///
/// `update` must apply the read-modify-write as one atomic step with respect
/// to other callers on the same key.
pub trait RateLimitStore: Send + Sync {
    fn get(&self, key: &str) -> Option<RateLimitWindow>;

    fn set(&self, key: &str, window: RateLimitWindow);

    fn delete(&self, key: &str);

    /// Replace the window for `key` with `f(current)` and return the new value.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<RateLimitWindow>) -> RateLimitWindow,
    ) -> RateLimitWindow;

    /// Keep only the windows for which `keep` returns true. Returns the number
    /// of windows removed.
    fn retain(&self, keep: &dyn Fn(&RateLimitWindow) -> bool) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store. Locks are per shard, never over the whole table.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    entries: DashMap<String, RateLimitWindow>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    fn get(&self, key: &str) -> Option<RateLimitWindow> {
        self.entries.get(key).map(|entry| *entry.value())
    }

    fn set(&self, key: &str, window: RateLimitWindow) {
        self.entries.insert(key.to_owned(), window);
    }

    fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<RateLimitWindow>) -> RateLimitWindow,
    ) -> RateLimitWindow {
        // The entry guard holds the shard lock until it is dropped.
        match self.entries.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => {
                let next = f(Some(*entry.get()));
                *entry.get_mut() = next;
                next
            }
            Entry::Vacant(entry) => {
                let next = f(None);
                entry.insert(next);
                next
            }
        }
    }

    fn retain(&self, keep: &dyn Fn(&RateLimitWindow) -> bool) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, window| {
            let kept = keep(window);
            if !kept {
                removed += 1;
            }
            kept
        });
        removed
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// Limiter
// ---------------------------------------------------------------------------

/// Counter values reported back to the client in response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: Timestamp,
}

/// Outcome of [`RateLimiter::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed(RateLimitStatus),
    Limited {
        status: RateLimitStatus,
        /// Whole seconds until the window resets, rounded up.
        retry_after_secs: u64,
    },
}

impl RateLimitDecision {
    pub fn status(&self) -> RateLimitStatus {
        match self {
            Self::Allowed(status) | Self::Limited { status, .. } => *status,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

/// Fixed-window limiter over a shared store.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// A limiter backed by a fresh [`MemoryRateLimitStore`].
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(Arc::new(MemoryRateLimitStore::new()), clock)
    }

    /// Count one request from `client` to `route` and decide whether to admit it.
    pub fn admit(&self, client: &str, route: &str, policy: &RateLimitPolicy) -> RateLimitDecision {
        let now = self.clock.now();
        let key = rate_limit_key(client, route);
        let fresh_reset_at = window_end(now, policy.window);

        let window = self.store.update(&key, &mut |current: Option<RateLimitWindow>| match current {
            Some(window) if window.is_current(now) => RateLimitWindow {
                count: window.count.saturating_add(1),
                reset_at: window.reset_at,
            },
            _ => RateLimitWindow {
                count: 1,
                reset_at: fresh_reset_at,
            },
        });

        let status = RateLimitStatus {
            limit: policy.max_requests,
            remaining: policy.max_requests.saturating_sub(window.count),
            reset_at: window.reset_at,
        };

        if window.count > policy.max_requests {
            RateLimitDecision::Limited {
                status,
                retry_after_secs: retry_after_secs(window.reset_at, now),
            }
        } else {
            RateLimitDecision::Allowed(status)
        }
    }

    /// Drop every window whose `reset_at` has passed. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        self.store.retain(&|window| window.is_current(now))
    }

    /// Number of tracked keys.
    pub fn tracked_keys(&self) -> usize {
        self.store.len()
    }
}

/// Store key for a (client, route) pair.
pub fn rate_limit_key(client: &str, route: &str) -> String {
    format!("{client}:{route}")
}

/// Seconds until `reset_at`, rounded up, never negative.
pub fn retry_after_secs(reset_at: Timestamp, now: Timestamp) -> u64 {
    let remaining_ms = (reset_at - now).num_milliseconds().max(0) as u64;
    remaining_ms.div_ceil(1000)
}

fn window_end(now: Timestamp, window: Duration) -> Timestamp {
    TimeDelta::from_std(window)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
