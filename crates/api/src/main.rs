use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use folio_core::clock::{Clock, SystemClock};
use folio_core::config::EnvConfig;
use folio_core::credentials::{CredentialStore, MemoryCredentialStore};
use folio_core::rate_limit::RateLimiter;
use folio_core::session::session_ttl;
use folio_db::credential_store::PgCredentialStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::assets::cloudinary::CloudinaryHost;
use folio_api::assets::{AssetHost, UnconfiguredAssetHost};
use folio_api::auth::session::SessionAuthenticator;
use folio_api::background::BackgroundTasks;
use folio_api::config::{ServerConfig, StoreBackend};
use folio_api::router::build_app_router;
use folio_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "folio_api=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store_backend = ?config.store_backend,
        production = config.production,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = folio_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    folio_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    folio_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Credential store ---
    let store: Arc<dyn CredentialStore> = match config.store_backend {
        StoreBackend::Postgres => Arc::new(PgCredentialStore::new(pool.clone())),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory credential store; sessions are lost on restart");
            Arc::new(MemoryCredentialStore::new())
        }
    };

    // --- Auth and rate limiting ---
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let auth = Arc::new(SessionAuthenticator::new(
        store,
        Arc::new(EnvConfig),
        Arc::clone(&clock),
        config.password_hash,
        session_ttl(config.session_ttl_days),
    ));
    let rate_limiter = RateLimiter::in_memory(Arc::clone(&clock));

    // --- Asset host ---
    let assets: Arc<dyn AssetHost> = match config.cloudinary.clone() {
        Some(cloudinary) => {
            tracing::info!(cloud_name = %cloudinary.cloud_name, "Image uploads enabled");
            Arc::new(CloudinaryHost::new(cloudinary))
        }
        None => {
            tracing::warn!("Cloudinary is not configured; uploads will fail");
            Arc::new(UnconfiguredAssetHost)
        }
    };

    // --- Background tasks ---
    let background = BackgroundTasks::start(
        Arc::clone(&auth),
        config.session_sweep_interval,
        rate_limiter.clone(),
        config.rate_limit_sweep_interval,
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        auth,
        rate_limiter,
        assets,
        clock,
    };

    let app = build_app_router(state, &config).context("Failed to build router")?;

    // --- Start server ---
    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    background.stop().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
