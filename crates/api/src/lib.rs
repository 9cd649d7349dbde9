//! Folio API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth, rate
//! limiting, routes, background tasks) so integration tests and the binary
//! entrypoint share one router and one middleware stack.

pub mod assets;
pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
