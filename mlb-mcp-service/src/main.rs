use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

mod api;
mod chat;
mod config;
mod error;
mod mcp;
mod ollama;
mod service;
mod statsapi;
mod teams;
mod tools;

use crate::chat::ChatState;
use crate::config::{AppConfig, Transport};
use crate::service::MlbService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr in every mode; stdout may be the protocol channel
    init_logging();

    info!("Starting MLB MCP service v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!(
        transport = ?config.server.transport,
        stats_api = %config.stats_api.base_url,
        "Configuration loaded"
    );

    let service = Arc::new(MlbService::new(config.clone())?);

    match config.server.transport {
        Transport::Stdio => {
            if config.chat.enabled {
                warn!("Chat front-end requires the http transport; ignoring chat.enabled");
            }
            mcp::stdio::serve_stdio(&service).await?;
        }
        Transport::Http => serve_http(config, service).await?,
    }

    Ok(())
}

async fn serve_http(
    config: AppConfig,
    service: Arc<MlbService>,
) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = PrometheusBuilder::new().install_recorder()?;

    let chat = if config.chat.enabled {
        let state = ChatState::connect(config.chat.clone(), service.clone()).await?;
        Some(Arc::new(state))
    } else {
        None
    };

    let app = api::router(service, metrics, chat);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let format = fmt::format()
        .with_target(true)
        .with_thread_ids(true)
        .compact();

    // Use RUST_LOG if set, otherwise default to info level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mlb_mcp_service=info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
