//! HTTP API for the MLB MCP service.
//!
//! This module provides:
//! - Health and metrics monitoring
//! - The MCP endpoint under the configured path
//! - The chat front-end under `/chat`, when enabled

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::chat::{self, ChatState};
use crate::mcp;
use crate::service::MlbService;

/// Application state
pub struct AppState {
    pub service: Arc<MlbService>,
    pub start_time: Instant,
    pub metrics: PrometheusHandle,
    pub chat: Option<Arc<ChatState>>,
}

/// Build the HTTP router
pub fn router(
    service: Arc<MlbService>,
    metrics: PrometheusHandle,
    chat: Option<Arc<ChatState>>,
) -> Router {
    let mcp_config = service.config().mcp.clone();

    let state = Arc::new(AppState {
        service: service.clone(),
        start_time: Instant::now(),
        metrics,
        chat: chat.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    if mcp_config.enabled {
        info!(path = %mcp_config.path, "MCP endpoint enabled");
        app = app.nest(&mcp_config.path, mcp::mcp_router(service));
    }

    if let Some(chat) = chat {
        info!("Chat front-end enabled at /chat");
        app = app.nest("/chat", chat::chat_router(chat));
    }

    app.layer(cors).layer(TraceLayer::new_for_http())
}

// === Health & Metrics ===

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model_available = match &state.chat {
        Some(chat) => Some(chat.model_available().await),
        None => None,
    };

    let status = match model_available {
        Some(false) => "degraded: model endpoint unavailable",
        _ => "healthy",
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        tools: crate::tools::REGISTRY.len(),
        teams: state.service.teams().len(),
        model_available,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
    tools: usize,
    teams: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_available: Option<bool>,
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
