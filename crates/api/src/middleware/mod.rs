//! Request gate stages, applied per route class with `route_layer`.
//!
//! - [`rate_limit::enforce_rate_limit`] -- fixed-window limiter keyed by client and path.
//! - [`session::require_session`] -- rejects requests without a live admin session.
//! - [`client_ip::client_identity`] -- best-effort requester identity from proxy headers.

pub mod client_ip;
pub mod rate_limit;
pub mod session;
