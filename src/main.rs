//! States/cities gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                     GATEWAY                      │
//!                    │                                                  │
//!  Client Request    │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!  ──────────────────┼─▶│  http   │──▶│ routing  │──▶│   upstream   │───┼──▶ Upstream
//!                    │  │ server  │   │ (400 on  │   │    client    │   │     API
//!                    │  └─────────┘   │ bad id)  │   └──────┬───────┘   │
//!                    │                └──────────┘          │           │
//!  Client Response   │  ┌──────────────────────┐            │           │
//!  ◀─────────────────┼──│ response normalizer  │◀───────────┘           │
//!                    │  │   ({id, name} only)  │                        │
//!                    │  └──────────────────────┘                        │
//!                    │                                                  │
//!                    │  cors · security headers · gzip · request id ·   │
//!                    │  timeout · tracing · metrics                     │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use states_gateway::config::{loader, ConfigError};
use states_gateway::lifecycle::{signals, Shutdown};
use states_gateway::observability::{logging, metrics};
use states_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "states-gateway")]
#[command(about = "Read-only gateway for the states/cities API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen port; takes precedence over `PORT` and the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = loader::resolve(cli.config.as_deref(), |key| std::env::var(key).ok())
        .map_err(|e: ConfigError| {
            eprintln!("states-gateway: {e}");
            e
        })?;
    if let Some(port) = cli.port {
        loader::set_port(&mut config, port);
    }

    logging::init(&config.observability.log_level);

    tracing::info!("states-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.request_timeout_secs,
        cors_origins = ?config.cors.effective_origins(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address was checked during validation.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
