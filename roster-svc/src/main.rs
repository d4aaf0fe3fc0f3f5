//! roster-svc - Guild roster service
//!
//! Loads the newest guild dump from the dump directory, serves roster
//! lookups over HTTP and merges uploaded dumps into the roster.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use roster_common::config::{ConfigOverrides, ServiceConfig};
use roster_svc::logging::init_tracing;
use roster_svc::store::RosterStore;
use roster_svc::{build_router, AppState};

/// Command-line arguments for roster-svc
#[derive(Parser, Debug)]
#[command(name = "roster-svc")]
#[command(about = "Guild roster lookup and dump merge service")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding guild dumps
    #[arg(short, long, env = "ROSTER_DUMP_DIR")]
    dump_dir: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "ROSTER_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, env = "ROSTER_BIND")]
    bind: Option<String>,

    /// Log file
    #[arg(long, env = "ROSTER_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ROSTER_LOG_LEVEL")]
    log_level: Option<String>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_path: args.config,
            dump_dir: args.dump_dir,
            bind_address: args.bind,
            port: args.port,
            log_file: args.log_file,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::load(args.into()).context("Failed to load configuration")?;

    init_tracing(&config.logging)?;

    // Log build identification immediately after tracing init
    info!(
        "Starting roster-svc v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config.source {
        Some(path) => info!("Configuration: {}", path.display()),
        None => warn!("No config file found, using defaults"),
    }
    info!("Dump directory: {}", config.dump_dir.display());

    // Without a roster there is nothing to serve
    let store = match RosterStore::open(&config.dump_dir) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load initial roster: {}", e);
            return Err(e.into());
        }
    };
    info!(
        "Serving {} on {}",
        store.identity().guild,
        store.identity().server
    );

    let state = AppState::new(store, config.logging.file.clone(), config.max_upload_bytes);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.bind_address.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.bind_address, config.port))?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("roster-svc listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

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
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
