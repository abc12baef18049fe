//! sos-analyzer - Speed-of-sound analysis service
//!
//! Estimates the speed of sound from clips holding two impulses a known
//! distance apart, and summarizes many such estimates.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sos_common::config::RootFolderResolver;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sos_analyzer::config::AnalyzerConfig;
use sos_analyzer::AppState;

/// Command-line arguments for sos-analyzer
#[derive(Parser, Debug)]
#[command(name = "sos-analyzer")]
#[command(about = "Speed-of-sound analysis service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "SOS_PORT")]
    port: Option<u16>,

    /// Root folder holding audio clips (overrides SOS_ROOT_FOLDER and config file)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Path to TOML config file
    #[arg(short, long, env = "SOS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = AnalyzerConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("sos_analyzer={0},sos_common={0},tower_http=info", config.logging.level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sos-analyzer (Speed of Sound) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let root_folder = RootFolderResolver::new()
        .with_cli_arg(args.root_folder)
        .with_toml_value(config.root_folder.clone())
        .resolve();
    if !root_folder.is_dir() {
        tracing::warn!(
            root_folder = %root_folder.display(),
            "Root folder does not exist; every clip lookup will fail"
        );
    }
    info!("Root folder: {}", root_folder.display());

    let analyzer = config
        .build_analyzer()
        .context("Invalid analysis configuration")?;
    info!(
        percentile = analyzer.detector().params().percentile,
        min_separation_samples = analyzer.detector().params().min_separation_samples,
        loudness_floor = analyzer.detector().params().loudness_floor,
        workers = analyzer.batch_params().parallelism,
        "Analyzer configured"
    );

    let state = AppState::new(analyzer, root_folder);
    let app = sos_analyzer::build_router(state);

    let port = args.port.unwrap_or_else(|| config.port());
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
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
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
