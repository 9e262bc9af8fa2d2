//! Hub Core daemon
//!
//! Boots the coordination layer on its own: core cache pools, the unified
//! scheduler with the maintenance task, and an in-memory task log. The
//! production backend does the same wiring with its module manifests and
//! database-backed log store.

use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hub_core::tasklog::MemoryTaskLogStore;
use hub_core::{bootstrap, system_clock, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info", overridable with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hub_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hub coordination layer");

    let config = Config::from_env();
    info!(
        tick_secs = config.tick_interval_secs,
        purge_secs = config.cache_purge_interval_secs,
        "Configuration loaded"
    );

    let log_store = Arc::new(MemoryTaskLogStore::new());
    let (context, scheduler) = bootstrap(&config, Vec::new(), log_store, system_clock())?;
    info!(pools = ?context.cache.pool_names(), "Cache pools ready");

    let handle = scheduler.handle();
    let scheduler_join = tokio::spawn(scheduler.run());

    shutdown_signal().await;

    // Cooperative stop: the loop exits after its current tick and no task
    // is cancelled mid-run.
    handle.stop();
    scheduler_join.await?;

    info!("Shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
}
