//! cosmic-api - Cosmic Journey backend
//!
//! Aggregates third-party APIs (celestial-body data, NASA imagery, YouTube,
//! OpenAI, fal.ai) for the selected planet and stores per-user journal
//! entries in SQLite.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cosmic_common::config::{Credentials, RootFolderInitializer, RootFolderResolver, TomlConfig};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cosmic_api::AppState;

/// Command-line arguments for cosmic-api
#[derive(Parser, Debug)]
#[command(name = "cosmic-api")]
#[command(about = "Cosmic Journey API server")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: std::net::IpAddr,

    /// TOML configuration file (default: <config_dir>/cosmic-journey/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root folder holding the journal database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,
}

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config decides the default log level, so it is loaded under a temporary subscriber
    let config = tracing::subscriber::with_default(
        tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).finish(),
        || TomlConfig::load_or_default(args.config.as_deref()),
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting Cosmic Journey API (cosmic-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Credentials: environment → TOML
    let credentials = Credentials::resolve(&config.api_keys);
    credentials.log_presence();

    // Root folder: CLI → env → TOML → OS default
    let root_folder =
        RootFolderResolver::new(args.root_folder.clone(), config.root_folder.clone()).resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database: {}", db_path.display());

    let db_pool = cosmic_api::db::init_database_pool(&db_path)
        .await
        .context("Failed to open journal database")?;
    info!("Database connection established");

    let state = AppState::new(db_pool, &config, credentials)
        .context("Failed to build upstream HTTP client")?;
    let app = cosmic_api::build_router(state);

    let port = args.port.or(config.port).unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::new(args.bind, port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
