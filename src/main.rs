//! Folio site server: the public portfolio pages.
//!
//! Main entry point that loads configuration, starts the status poller and
//! serves the site router.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt};

use folio::site::{SiteState, build_router};
use folio_auth::MemorySessionStore;
use folio_client::{ApiClient, Services};
use folio_core::AppError;
use folio_core::config::AppConfig;
use folio_service::status::StatusPoller;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `FOLIO_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("FOLIO_ENV").unwrap_or_else(|_| "development".to_string());
    let dir = std::env::var("FOLIO_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    AppConfig::load_from(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Folio site v{}", env!("CARGO_PKG_VERSION"));

    // Visitors are anonymous; nothing is persisted.
    let store = Arc::new(MemorySessionStore::new());
    let client = Arc::new(ApiClient::new(config.api.clone(), store)?);
    let services = Services::new(client);
    tracing::info!(api = %config.api.base_url, "Backend client ready");

    let cancel = CancellationToken::new();
    let poller = StatusPoller::new(services.status.clone(), config.status.refresh_interval());
    let (status_rx, poller_handle) = poller.spawn(cancel.clone());

    let addr = config.site.bind_addr();
    let state = SiteState::new(Arc::new(config), services, status_rx);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Folio site listening on {}", addr);

    let shutdown = cancel.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, stopping...");
            shutdown.cancel();
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), poller_handle).await;

    tracing::info!("Folio site shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
