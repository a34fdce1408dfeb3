//! devdiag-svc - Device diagnostics daemon entry point
//!
//! Wires the AV decoder status tracker, the SSE bridge, and the HTTP
//! surface together, then serves until SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use devdiag_svc::avstatus::{IdleSource, StatusTracker};
use devdiag_svc::config::{Overrides, SvcConfig};
use devdiag_svc::milestones::MilestoneLog;
use devdiag_svc::remotecfg::ConfigClient;
use devdiag_svc::sse::{SseBroadcaster, SseSink};
use devdiag_svc::{build_router, AppState};

/// Command-line arguments for devdiag-svc
#[derive(Parser, Debug)]
#[command(name = "devdiag-svc")]
#[command(about = "Device diagnostics daemon")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "DEVDIAG_PORT")]
    port: Option<u16>,

    /// Remote configuration endpoint URL
    #[arg(long, env = "DEVDIAG_CONFIG_ENDPOINT")]
    config_endpoint: Option<String>,

    /// Milestone log file path
    #[arg(long, env = "DEVDIAG_MILESTONES_FILE")]
    milestones_file: Option<PathBuf>,

    /// AV decoder status poll interval, in seconds
    #[arg(long, env = "DEVDIAG_POLL_INTERVAL_SECS")]
    poll_interval_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting devdiag-svc v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let file_config =
        devdiag_common::config::load_file_config().context("Failed to load config file")?;
    let config = SvcConfig::resolve(
        Overrides {
            port: args.port,
            config_endpoint: args.config_endpoint,
            milestones_file: args.milestones_file,
            poll_interval_secs: args.poll_interval_secs,
        },
        file_config,
    );

    info!("Configuration endpoint: {}", config.config_endpoint);
    info!("Milestone log: {}", config.milestones_file.display());

    // Tracker with the platform status source; SSE clients receive decoder
    // transitions through the registered broadcast sink
    let broadcaster = SseBroadcaster::new(100);
    let tracker = Arc::new(StatusTracker::new(
        Arc::new(IdleSource::new()),
        config.poll_interval,
    ));
    tracker
        .register_listener(Arc::new(SseSink::new(broadcaster.clone())))
        .context("Failed to register SSE sink")?;
    tracker.start();
    info!(
        "AV decoder status tracker started ({}s poll interval)",
        config.poll_interval.as_secs()
    );

    let state = AppState::new(
        tracker.clone(),
        ConfigClient::new(&config.config_endpoint),
        MilestoneLog::new(&config.milestones_file),
        broadcaster,
    );
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("devdiag-svc listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Join the poll task before exiting
    tracker.stop().await;
    info!("Shutdown complete");
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
