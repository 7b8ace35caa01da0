//! DeskBook Monitor: live floor availability.
//!
//! Polls the desk directory in the background, re-resolves every mapped
//! desk on the floor render interval, and logs each desk whose status
//! changed since the previous render.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use deskbook_core::clock::{Clock, SystemClock};
use deskbook_core::config::AppConfig;
use deskbook_core::error::AppError;
use deskbook_service::{
    AvailabilityResolver, DeskDirectory, DeskKeyMap, DirectoryPoller, FloorService, FloorView,
    HttpDeskDirectory,
};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Monitor error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("DESKBOOK_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

    AppConfig::load(&config_path)
        .map_err(|e| AppError::configuration(format!("Config load error: {}", e)))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt().pretty().with_env_filter(filter).with_target(true).init();
    }
}

/// Wire the poller and floor renderer together and run until shutdown
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DeskBook monitor v{}", env!("CARGO_PKG_VERSION"));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let key_map = DeskKeyMap::from_config(&config.floor)?;
    tracing::info!("Floor plan loaded with {} mapped desks", key_map.len());
    let resolver = AvailabilityResolver::from_config(&config.resolver);
    tracing::info!(
        open_ended_bookings = ?resolver.open_ended_bookings(),
        "Resolver configured"
    );
    let floor = FloorService::new(key_map, resolver, Arc::clone(&clock));

    let directory: Arc<dyn DeskDirectory> = Arc::new(HttpDeskDirectory::new(&config.directory)?);
    tracing::info!("Desk directory at {}", config.directory.desks_url());

    let poller = Arc::new(DirectoryPoller::new(
        directory,
        Arc::clone(&clock),
        config.directory.poll_interval(),
    ));
    let mut snapshots = poller.subscribe();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller_handle = tokio::spawn({
        let poller = Arc::clone(&poller);
        async move { poller.run(shutdown_rx).await }
    });

    let mut render_tick =
        tokio::time::interval(Duration::from_secs(config.floor.render_interval_seconds));
    let mut previous: Option<FloorView> = None;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = render_tick.tick() => {}
            changed = snapshots.changed() => {
                if changed.is_err() {
                    tracing::warn!("Directory poller stopped unexpectedly");
                    break;
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }

        let Some(snapshot) = snapshots.borrow_and_update().clone() else {
            continue;
        };

        let view = floor.render(&snapshot);
        match &previous {
            None => tracing::info!(
                available = view.summary.available,
                pending = view.summary.pending,
                booked = view.summary.booked,
                missing = view.summary.missing,
                "Initial floor rendered"
            ),
            Some(prev) => {
                for change in view.changes_since(prev) {
                    tracing::info!(
                        desk = %change.key,
                        from = ?change.from,
                        to = ?change.to,
                        "Desk status changed"
                    );
                }
            }
        }
        previous = Some(view);
    }

    let _ = shutdown_tx.send(true);
    let _ = tokio::time::timeout(Duration::from_secs(10), poller_handle).await;

    tracing::info!("DeskBook monitor stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
