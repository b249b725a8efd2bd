//! MCP (Model Context Protocol) server.
//!
//! JSON-RPC 2.0 message types and a method router shared by the stdio
//! transport and the HTTP endpoint.

mod handlers;
pub mod stdio;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response, Sse, sse::Event},
    routing::{get, post},
};
use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::service::MlbService;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// MCP server state
pub struct McpState {
    pub service: Arc<MlbService>,
}

/// Build the MCP router
pub fn mcp_router(service: Arc<MlbService>) -> Router {
    let state = Arc::new(McpState { service });

    Router::new()
        .route("/", get(mcp_sse_handler))
        .route("/messages", post(mcp_message_handler))
        .with_state(state)
}

/// SSE handshake: announces where to POST messages, then keeps the stream open
async fn mcp_sse_handler(
    State(state): State<Arc<McpState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("MCP client connected");

    let endpoint = format!(
        "{}/messages",
        state.service.config().mcp.path.trim_end_matches('/')
    );
    let stream = stream::once(async move {
        Ok::<_, Infallible>(Event::default().event("endpoint").data(endpoint))
    })
    .chain(stream::pending());

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

/// JSON-RPC over HTTP POST. Notifications are acknowledged with 202.
async fn mcp_message_handler(State(state): State<Arc<McpState>>, body: Bytes) -> Response {
    match handle_message(&state.service, &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Parse one raw message and route it.
///
/// Unparseable input gets -32700 with a null id; JSON that is not a
/// request gets -32600 with whatever id it carried.
pub async fn handle_message(service: &MlbService, message: &[u8]) -> Option<McpResponse> {
    let value: Value = match serde_json::from_slice(message) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Unparseable JSON-RPC message");
            return Some(parse_error(format!("Parse error: {}", e)));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<McpRequest>(value) {
        Ok(request) => handle_request(service, request).await,
        Err(e) => {
            debug!(error = %e, "Invalid JSON-RPC request");
            Some(McpResponse::failure(
                id,
                McpError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
            ))
        }
    }
}

pub fn parse_error(message: impl Into<String>) -> McpResponse {
    McpResponse::failure(Value::Null, McpError::new(PARSE_ERROR, message))
}

/// Route one request. Returns `None` for notifications.
pub async fn handle_request(service: &MlbService, request: McpRequest) -> Option<McpResponse> {
    debug!(method = %request.method, "MCP request received");

    let Some(id) = request.id else {
        debug!(method = %request.method, "MCP notification");
        return None;
    };

    let result = match request.method.as_str() {
        "initialize" => Ok(handlers::handle_initialize()),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => Ok(handlers::handle_tools_list()),
        "tools/call" => handlers::handle_tool_call(service, request.params).await,
        _ => Err(McpError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        )),
    };

    Some(match result {
        Ok(data) => McpResponse::success(id, data),
        Err(error) => McpResponse::failure(id, error),
    })
}

// MCP Protocol Types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    /// Absent for notifications. An explicit `null` is still a request.
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

fn present_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl McpRequest {
    pub fn new(id: u64, method: &str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(Value::from(id)),
            method: method.to_string(),
            params,
        }
    }

    pub fn notification(method: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: method.to_string(),
            params: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: McpError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl From<ToolError> for McpError {
    fn from(error: ToolError) -> Self {
        let mut data = serde_json::json!({ "kind": error.kind() });
        if let ToolError::Upstream {
            status: Some(status),
            ..
        } = &error
        {
            data["status"] = Value::from(*status);
        }
        Self {
            code: error.rpc_code(),
            message: error.to_string(),
            data: Some(data),
        }
    }
}
