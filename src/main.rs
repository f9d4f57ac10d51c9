//! Crittr Demo Server
//!
//! Hosts one demo session's cache over HTTP so the dashboard can run
//! without a backend.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crittr_demo_cache::api::create_router;
use crittr_demo_cache::cache::{MemoryStorage, SystemClock};
use crittr_demo_cache::{seed_demo_data, spawn_load_sweep, AppState, Config, DemoCache};

/// Main entry point for the demo server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the demo cache and seed starter data
/// 4. Bind the listener, then fire the one-shot load sweep
/// 5. Serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crittr_demo_cache=info,crittr_demo=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Crittr demo server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, seed_demo_data={}, load_sweep_delay={}ms",
        config.server_port, config.seed_demo_data, config.load_sweep_delay_ms
    );

    let mut cache = DemoCache::in_browser(MemoryStorage::new(), SystemClock);
    info!("Demo cache initialized in {:?} mode", cache.mode());
    if config.seed_demo_data {
        seed_demo_data(&mut cache);
    }
    let state = AppState::new(cache);

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // The session is loaded once the listener is up
    let sweep_handle = spawn_load_sweep(
        state.cache.clone(),
        Duration::from_millis(config.load_sweep_delay_ms),
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// Aborts the load sweep if it has not run yet.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<usize>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if !sweep_handle.is_finished() {
        sweep_handle.abort();
        warn!("Load sweep aborted before it ran");
    }
}
