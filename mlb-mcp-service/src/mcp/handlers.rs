//! MCP message handlers.
//!
//! Handlers for initialize, tools/list and tools/call requests.

use serde_json::{Value, json};
use tracing::debug;

use super::{INVALID_PARAMS, McpError, PROTOCOL_VERSION};
use crate::service::MlbService;
use crate::tools::REGISTRY;

const INSTRUCTIONS: &str = "MLB statistics tools backed by the public MLB Stats API. \
Use team_id or lookup_team to resolve team ids and lookup_player to resolve player ids \
before calling tools that need them. tool_search finds the right tool for a question.";

/// Handle initialize request
pub fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": INSTRUCTIONS
    })
}

/// Handle tools/list request
pub fn handle_tools_list() -> Value {
    json!({ "tools": REGISTRY.mcp_definitions() })
}

/// Handle tools/call request
pub async fn handle_tool_call(
    service: &MlbService,
    params: Option<Value>,
) -> Result<Value, McpError> {
    let params = params.ok_or_else(|| McpError::new(INVALID_PARAMS, "Missing params"))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::new(INVALID_PARAMS, "Missing tool name"))?;

    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
    debug!(tool = %name, "MCP tool call");

    let output = service.call_tool(name, arguments).await?;

    let mut result = json!({
        "content": [{
            "type": "text",
            "text": output.to_text()
        }],
        "isError": false
    });
    if let Some(structured) = output.structured() {
        result["structuredContent"] = structured.clone();
    }
    Ok(result)
}
