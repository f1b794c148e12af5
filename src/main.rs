//! Google Drive bearer-token relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                  DRIVE RELAY                 │
//!   Client request      │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ────────────────────┼─▶│  http  │──▶│ security │──▶│  upstream  │──┼──▶ Google
//!   Authorization:      │  │ server │   │  bearer  │   │   client   │  │    userinfo /
//!     Bearer <token>    │  └────────┘   └──────────┘   └─────┬──────┘  │    Drive v3
//!                       │                                    │         │
//!   Client response     │  ┌──────────────────────────┐      │         │
//!   ◀───────────────────┼──│ response / error relay   │◀─────┘         │
//!                       │  └──────────────────────────┘                │
//!                       │   config · observability · lifecycle         │
//!                       └──────────────────────────────────────────────┘
//! ```
//!
//! One inbound request, one outbound GET, status and body relayed.

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use drive_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use drive_relay::lifecycle::{wait_for_signal, Shutdown};
use drive_relay::observability::{logging, metrics};
use drive_relay::HttpServer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`
    #[arg(short, long, env = "RELAY_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        "drive-relay starting"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
