//! Edge reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────┐
//!     ────────────────────┼─▶ http server ─▶ asset store ── hit ─┐       │
//!                         │                     │ miss            │       │
//!                         │                     ▼                 │       │
//!                         │               forward request ────────┼───────┼──▶ Origin
//!     Client Response     │                     │                 │       │
//!     ◀───────────────────┼── x-proxied-by ◀────┘◀────────────────┘       │
//!                         │                                               │
//!                         │   config · logging · metrics · shutdown       │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_proxy::config::{resolve_config, ConfigOverrides};
use edge_proxy::observability::{logging, metrics};
use edge_proxy::{HttpServer, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "edge-proxy", version, about = "Forward every request to one origin")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "EDGE_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Origin base URL
    #[arg(long, env = "ORIGIN_URL")]
    origin: Option<String>,

    /// Listen address
    #[arg(long, env = "BIND_ADDRESS")]
    bind: Option<String>,

    /// Directory of static assets served before the origin
    #[arg(long, env = "ASSETS_DIR")]
    assets: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            origin_url: self.origin.clone(),
            bind_address: self.bind.clone(),
            assets_dir: self.assets.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.overrides())?;

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!("edge-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = config.origin.url.as_deref().unwrap_or_default(),
        assets = ?config.assets.dir,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
