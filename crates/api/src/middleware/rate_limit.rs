//! Rate-limit gate stage.
//!
//! Every response from a gated route carries `X-RateLimit-Limit`,
//! `X-RateLimit-Remaining` and `X-RateLimit-Reset` (epoch milliseconds),
//! whether the request was admitted or not. Denials add `Retry-After`.

use std::sync::Arc;

use axum::extract::{OriginalUri, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use folio_core::rate_limit::{RateLimitDecision, RateLimitPolicy, RateLimitStatus, RateLimiter};

use crate::error::AppError;
use crate::middleware::client_ip::client_identity;

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Middleware state: the shared limiter plus the policy for one route class.
#[derive(Clone)]
pub struct RateLimitGate {
    pub limiter: RateLimiter,
    pub policy: Arc<RateLimitPolicy>,
}

impl RateLimitGate {
    pub fn new(limiter: RateLimiter, policy: RateLimitPolicy) -> Self {
        Self {
            limiter,
            policy: Arc::new(policy),
        }
    }
}

/// Count the request against its (client, path) window; 429 once the window
/// is exhausted.
///
/// The path is the full request path as the client sent it, so nested routers
/// still key on `/api/...`.
pub async fn enforce_rate_limit(
    State(gate): State<RateLimitGate>,
    req: Request,
    next: Next,
) -> Response {
    let client = client_identity(req.headers());
    let route = req
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| req.uri().path().to_string(), |uri| uri.path().to_string());

    match gate.limiter.admit(&client, &route, &gate.policy) {
        RateLimitDecision::Allowed(status) => {
            let mut response = next.run(req).await;
            apply_rate_limit_headers(response.headers_mut(), &status, None);
            response
        }
        RateLimitDecision::Limited {
            status,
            retry_after_secs,
        } => {
            tracing::warn!(
                client = %client,
                route = %route,
                retry_after_secs,
                "Rate limit exceeded"
            );
            AppError::RateLimited {
                message: gate.policy.message.clone(),
                status,
                retry_after_secs,
            }
            .into_response()
        }
    }
}

/// Write the rate-limit headers for `status`, plus `Retry-After` on denial.
pub fn apply_rate_limit_headers(
    headers: &mut HeaderMap,
    status: &RateLimitStatus,
    retry_after_secs: Option<u64>,
) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(status.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(status.remaining));
    headers.insert(
        X_RATELIMIT_RESET,
        HeaderValue::from(status.reset_at.timestamp_millis()),
    );
    if let Some(secs) = retry_after_secs {
        headers.insert(axum::http::header::RETRY_AFTER, HeaderValue::from(secs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn headers_for_admitted_request() {
        let mut headers = HeaderMap::new();
        let status = RateLimitStatus {
            limit: 5,
            remaining: 4,
            reset_at: Utc.timestamp_millis_opt(1_700_000_900_000).unwrap(),
        };
        apply_rate_limit_headers(&mut headers, &status, None);

        assert_eq!(headers[X_RATELIMIT_LIMIT], "5");
        assert_eq!(headers[X_RATELIMIT_REMAINING], "4");
        assert_eq!(headers[X_RATELIMIT_RESET], "1700000900000");
        assert!(headers.get(axum::http::header::RETRY_AFTER).is_none());
    }

    #[test]
    fn denial_adds_retry_after() {
        let mut headers = HeaderMap::new();
        let status = RateLimitStatus {
            limit: 5,
            remaining: 0,
            reset_at: Utc.timestamp_millis_opt(0).unwrap(),
        };
        apply_rate_limit_headers(&mut headers, &status, Some(12));
        assert_eq!(headers[axum::http::header::RETRY_AFTER], "12");
        assert_eq!(headers[X_RATELIMIT_REMAINING], "0");
    }
}
