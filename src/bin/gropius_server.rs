//! Serves the agent registry, tool-server registry and message relay over
//! HTTP.
//!
//! Usage:
//!
//! ```text
//! gropius_server [--addr 127.0.0.1:8000] [--stream-timeout-secs 300] [--log-json]
//! ```
//!
//! Every flag can also be set through its `GROPIUS_*` environment variable.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use gropius::{
    api::{HttpAppState, router},
    config::{DEFAULT_EVENT_BUFFER, RelayConfig},
    telemetry::init_tracing,
};
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "gropius_server")]
#[command(version, about = "Agent registry and streaming message relay")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8000", env = "GROPIUS_ADDR")]
    addr: SocketAddr,

    /// Seconds allowed for fetching an agent card.
    #[arg(long, default_value_t = 5, env = "GROPIUS_DESCRIPTOR_TIMEOUT_SECS")]
    descriptor_timeout_secs: u64,

    /// Seconds allowed for establishing a connection to an agent.
    #[arg(long, default_value_t = 10, env = "GROPIUS_CONNECT_TIMEOUT_SECS")]
    connect_timeout_secs: u64,

    /// Upper bound in seconds on a whole streamed reply. Unbounded when unset.
    #[arg(long, env = "GROPIUS_STREAM_TIMEOUT_SECS")]
    stream_timeout_secs: Option<u64>,

    /// Events buffered per relay before the agent stream is paused.
    #[arg(long, default_value_t = DEFAULT_EVENT_BUFFER, env = "GROPIUS_EVENT_BUFFER")]
    event_buffer: usize,

    /// Log level for the gropius crate when `RUST_LOG` is unset.
    #[arg(long, default_value = "info", env = "GROPIUS_LOG_LEVEL")]
    log_level: String,

    /// Output logs as JSON.
    #[arg(long, env = "GROPIUS_LOG_JSON")]
    log_json: bool,
}

impl Args {
    fn relay_config(&self) -> RelayConfig {
        RelayConfig::default()
            .with_descriptor_timeout(Duration::from_secs(self.descriptor_timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_stream_timeout(self.stream_timeout_secs.map(Duration::from_secs))
            .with_event_buffer(self.event_buffer)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();
    init_tracing(&format!("gropius={}", args.log_level), args.log_json)?;

    let config = args.relay_config();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %args.addr,
        descriptor_timeout = ?config.descriptor_timeout(),
        stream_timeout = ?config.stream_timeout(),
        "starting gropius server"
    );

    let state = HttpAppState::over_http(config)?;
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gropius server stopped");
    Ok(())
}
