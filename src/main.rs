//! Shot-list generation service.
//!
//! Accepts a film script over HTTP, asks a chat-completion model for a
//! structured shot list, and relays the JSON back with CORS headers for a
//! browser front-end.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────┐
//!     ────────────────────┼─▶ CORS / request ID / limits / timeout      │
//!                         │          │                                   │
//!                         │          ▼                                   │
//!                         │   handler: validate → prompt ─────────────┼──▶ Completion
//!                         │          │                                 │    API
//!                         │          ▼                                 │
//!     Client Response     │   parse model content (degrade to [])  ◀──┼─── raw body
//!     ◀───────────────────┼──────────┘                                   │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use shot_list_service::config::{load_config, validate_config, ConfigError, ServiceConfig};
use shot_list_service::observability::logging;
use shot_list_service::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "shot-list-service")]
#[command(about = "Turns film scripts into shot lists via a chat-completion API", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::from_env(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability.log_level)?;

    tracing::info!("shot-list-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        endpoint = %config.upstream.endpoint,
        model = %config.upstream.model,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    if config.api_key.is_none() {
        tracing::warn!(
            variable = %config.upstream.api_key_env,
            "API key not set; generation requests will fail until it is configured"
        );
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
