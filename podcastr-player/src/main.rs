//! Podcastr Player (podcastr-player) - Main entry point
//!
//! Serves the episode catalog and the shared player session over HTTP,
//! pushing session changes to connected clients over SSE.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use podcastr_common::config::{load_toml_config, ConfigResolver};
use podcastr_common::EventBus;
use podcastr_player::config::TomlConfig;
use podcastr_player::{build_router, AppState, Catalog, PlayerController};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for podcastr-player
#[derive(Parser, Debug)]
#[command(name = "podcastr-player")]
#[command(about = "Podcast episode listing with a persistent player session")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "PODCASTR_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "PODCASTR_PORT")]
    port: Option<u16>,

    /// JSON file with the episode records
    #[arg(long, env = "PODCASTR_CATALOG")]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = ConfigResolver::new("player").resolve(args.config.as_deref());
    let config: TomlConfig =
        load_toml_config(config_path.as_deref()).context("Failed to load configuration")?;
    let config = config.with_overrides(args.port, args.catalog);

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "podcastr_player={level},podcastr_common={level},tower_http={level}",
                    level = config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Podcastr Player (podcastr-player) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) if !path.exists() => {
            warn!("Config file {} not found, using built-in defaults", path.display())
        }
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("Config file: none"),
    }

    let catalog = Catalog::load(&config.catalog_path, config.latest_count)
        .context("Failed to load episode catalog")?
        .with_listing_limit(config.listing_limit);

    let controller = Arc::new(PlayerController::new(EventBus::new(config.event_capacity)));
    info!("Player session initialized");

    let app = build_router(AppState::new(controller, Arc::new(catalog)));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("podcastr-player listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
