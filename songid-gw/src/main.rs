//! songid-gw - Song Identification Gateway
//!
//! Accepts audio uploads over HTTP, submits them to the acoustic-fingerprint
//! provider as signed requests and returns normalized song metadata.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use songid_common::shutdown::wait_for_shutdown;
use songid_gw::build_info::BUILD_INFO;
use songid_gw::config::GatewayConfig;
use songid_gw::{build_router, AppState};

/// Command-line arguments for songid-gw
#[derive(Parser, Debug)]
#[command(name = "songid-gw")]
#[command(about = "Song identification gateway")]
#[command(version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "SONGID_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind (overrides [server] host)
    #[arg(long, env = "SONGID_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides [server] port)
    #[arg(short, long, env = "SONGID_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songid_gw=info,songid_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting songid-gw {}", BUILD_INFO);

    let args = Args::parse();

    let config_path = args
        .config
        .unwrap_or_else(songid_common::config::default_config_path);
    let toml_config = songid_common::config::load_or_default(&config_path)
        .context("Failed to load configuration")?;

    let mut config = GatewayConfig::resolve(toml_config);
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Provider endpoint: {}{}", config.provider.base_url, config.provider.endpoint_path);
    info!(
        "Upload field '{}', limit {} bytes",
        config.upload.field_name, config.upload.max_bytes
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let state = AppState::new(config).context("Failed to create provider client")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = wait_for_shutdown().await;
            info!("Received {}, shutting down", signal);
        })
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
