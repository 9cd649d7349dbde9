//! Domain types and request-independent logic for the Folio blog API.
//!
//! Nothing in this crate performs network or database I/O directly; storage
//! is reached through the [`credentials::CredentialStore`] and
//! [`rate_limit::RateLimitStore`] traits so the server and the tests can plug
//! in their own implementations.

pub mod clock;
pub mod config;
pub mod content;
pub mod credentials;
pub mod error;
pub mod hashing;
pub mod rate_limit;
pub mod session;
pub mod types;
pub mod validation;
