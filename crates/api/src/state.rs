use std::sync::Arc;

use folio_core::clock::Clock;
use folio_core::rate_limit::RateLimiter;

use crate::assets::AssetHost;
use crate::auth::session::SessionAuthenticator;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Content database connection pool.
    pub pool: folio_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Login, logout and session checks for the admin.
    pub auth: Arc<SessionAuthenticator>,
    /// Process-wide limiter shared by every rate-limited route class.
    pub rate_limiter: RateLimiter,
    /// Image host used by the upload route.
    pub assets: Arc<dyn AssetHost>,
    pub clock: Arc<dyn Clock>,
}
