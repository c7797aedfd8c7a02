//! Dynasty Urban Style API server.

use std::process;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use dynasty_urban_style::adapters::auth::{JwtConfig, JwtTokenService};
use dynasty_urban_style::adapters::http::{create_router, AppState, SessionCookie};
use dynasty_urban_style::adapters::storage::{InMemoryBlobStorage, LocalBlobStorage};
use dynasty_urban_style::config::{AppConfig, ConfigError, StorageBackend};
use dynasty_urban_style::ports::BlobStorage;

const TRACING_TARGET_STARTUP: &str = "dynasty_urban_style::startup";
const TRACING_TARGET_SHUTDOWN: &str = "dynasty_urban_style::shutdown";

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(target: TRACING_TARGET_SHUTDOWN, "server stopped");
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(target: TRACING_TARGET_SHUTDOWN, error = %error, "server terminated with error");
    } else {
        eprintln!("Error: {error}");
    }
    process::exit(1);
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(ConfigError::from)?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "starting dynasty urban style api"
    );

    let tokens = Arc::new(JwtTokenService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.issuer.clone(),
        config.auth.token_ttl_secs,
    )));

    let storage: Arc<dyn BlobStorage> = match config.storage.backend {
        StorageBackend::Local => Arc::new(LocalBlobStorage::new(
            &config.storage.base_path,
            config.storage.public_base_url.clone(),
        )),
        StorageBackend::Memory => Arc::new(InMemoryBlobStorage::new()),
    };

    let state = match config.database.url() {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .min_connections(config.database.min_connections)
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.acquire_timeout())
                .idle_timeout(config.database.idle_timeout())
                .max_lifetime(config.database.max_lifetime())
                .connect(url)
                .await?;
            tracing::info!(target: TRACING_TARGET_STARTUP, "connected to postgres");
            AppState::postgres(pool, tokens, storage)
        }
        None => {
            tracing::warn!(
                target: TRACING_TARGET_STARTUP,
                "no database url configured, data is kept in memory"
            );
            AppState::in_memory(tokens, storage)
        }
    };

    let state = state.with_cookie(SessionCookie {
        domain: config.auth.cookie_domain.clone(),
        secure: config.is_production(),
    });

    let router = create_router(state, &config.server, &config.storage);

    let addr = config.server.socket_addr().map_err(ConfigError::from)?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        %addr,
        prefix = %config.server.api_prefix(),
        "listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Human-readable output in development, JSON lines in production.
/// `RUST_LOG` overrides the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(target: TRACING_TARGET_SHUTDOWN, %error, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(target: TRACING_TARGET_SHUTDOWN, %error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!(target: TRACING_TARGET_SHUTDOWN, "shutdown signal received");
}
