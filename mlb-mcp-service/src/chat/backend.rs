//! Where the chat front-end sends tool calls.
//!
//! `Local` runs tools in this process. `Stdio` launches a tool server
//! child process and speaks MCP to it over its stdin/stdout.

use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::process::Stdio as PipeMode;
use std::sync::Arc;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::mcp::{McpRequest, McpResponse, PROTOCOL_VERSION};
use crate::service::MlbService;
use crate::tools::{McpToolDefinition, REGISTRY, ToolOutput};

/// Tool description handed to the planner and the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<McpToolDefinition> for ToolSchema {
    fn from(def: McpToolDefinition) -> Self {
        Self {
            name: def.name,
            description: def.description,
            parameters: def.input_schema,
        }
    }
}

pub enum ToolBackend {
    Local(Arc<MlbService>),
    Stdio(StdioToolServer),
}

impl ToolBackend {
    pub async fn list_tools(&self) -> ServiceResult<Vec<ToolSchema>> {
        match self {
            ToolBackend::Local(_) => Ok(REGISTRY
                .mcp_definitions()
                .into_iter()
                .map(ToolSchema::from)
                .collect()),
            ToolBackend::Stdio(server) => server.list_tools().await,
        }
    }

    /// Call a tool. Text output comes back as a JSON string.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ServiceResult<Value> {
        match self {
            ToolBackend::Local(service) => match service.call_tool(name, arguments).await? {
                ToolOutput::Text(text) => Ok(Value::String(text)),
                ToolOutput::Json(value) => Ok(value),
            },
            ToolBackend::Stdio(server) => server.call_tool(name, arguments).await,
        }
    }

    /// Label for the status panel
    pub fn describe(&self) -> String {
        match self {
            ToolBackend::Local(_) => "in-process".to_string(),
            ToolBackend::Stdio(server) => server.command.clone(),
        }
    }
}

/// A tool server child process reached over newline-delimited JSON-RPC
pub struct StdioToolServer {
    command: String,
    connection: Mutex<Connection>,
}

struct Connection {
    // Held so the child is killed when the backend is dropped
    _child: Child,
    writer: FramedWrite<ChildStdin, LinesCodec>,
    reader: FramedRead<ChildStdout, LinesCodec>,
    next_id: u64,
}

impl StdioToolServer {
    /// Launch the child and complete the MCP handshake
    pub async fn spawn(program: &str, args: &[String]) -> ServiceResult<Self> {
        let command = std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        info!(command = %command, "Launching tool server");

        let mut child = Command::new(program)
            .args(args)
            .stdin(PipeMode::piped())
            .stdout(PipeMode::piped())
            .stderr(PipeMode::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| tool_server_error(format!("Failed to launch '{}': {}", command, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| tool_server_error("Child stdin unavailable"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| tool_server_error("Child stdout unavailable"))?;

        let server = Self {
            command,
            connection: Mutex::new(Connection {
                _child: child,
                writer: FramedWrite::new(stdin, LinesCodec::new()),
                reader: FramedRead::new(stdout, LinesCodec::new()),
                next_id: 1,
            }),
        };

        let init = server
            .request(
                "initialize",
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            )
            .await?;
        server.notify("notifications/initialized").await?;
        debug!(server_info = %init["serverInfo"], "Tool server initialized");

        Ok(server)
    }

    pub async fn list_tools(&self) -> ServiceResult<Vec<ToolSchema>> {
        let result = self.request("tools/list", json!({})).await?;
        let tools: Vec<McpToolDefinition> =
            serde_json::from_value(result.get("tools").cloned().unwrap_or(Value::Null)).map_err(
                |e| tool_server_error(format!("Malformed tools/list result: {}", e)),
            )?;
        Ok(tools.into_iter().map(ToolSchema::from).collect())
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> ServiceResult<Value> {
        let result = self
            .request("tools/call", json!({ "name": name, "arguments": arguments }))
            .await?;

        let text = result["content"][0]["text"].as_str().unwrap_or_default();
        if result["isError"].as_bool().unwrap_or(false) {
            return Err(tool_server_error(text.to_string()));
        }
        Ok(match result.get("structuredContent") {
            Some(structured) => structured.clone(),
            None => Value::String(text.to_string()),
        })
    }

    /// Send a request and wait for the response with the same id.
    ///
    /// Requests are serialized: the lock is held until the reply arrives.
    async fn request(&self, method: &str, params: Value) -> ServiceResult<Value> {
        let mut conn = self.connection.lock().await;
        let id = conn.next_id;
        conn.next_id += 1;

        let line = serde_json::to_string(&McpRequest::new(id, method, Some(params)))
            .map_err(|e| tool_server_error(format!("Failed to encode request: {}", e)))?;
        conn.writer
            .send(line)
            .await
            .map_err(|e| tool_server_error(format!("Failed to write to tool server: {}", e)))?;

        loop {
            let line = match conn.reader.next().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    return Err(tool_server_error(format!("Failed to read from tool server: {}", e)));
                }
                None => return Err(tool_server_error("Tool server exited")),
            };

            let response: McpResponse = match serde_json::from_str(&line) {
                Ok(response) => response,
                Err(_) => {
                    warn!(line = %line, "Ignoring non-response line from tool server");
                    continue;
                }
            };
            if response.id != Value::from(id) {
                debug!(id = %response.id, expected = id, "Ignoring response to another request");
                continue;
            }

            if let Some(error) = response.error {
                return Err(tool_server_error(format!(
                    "{} (code {})",
                    error.message, error.code
                )));
            }
            return Ok(response.result.unwrap_or(Value::Null));
        }
    }

    async fn notify(&self, method: &str) -> ServiceResult<()> {
        let line = serde_json::to_string(&McpRequest::notification(method))
            .map_err(|e| tool_server_error(format!("Failed to encode notification: {}", e)))?;
        self.connection
            .lock()
            .await
            .writer
            .send(line)
            .await
            .map_err(|e| tool_server_error(format!("Failed to write to tool server: {}", e)))
    }
}

fn tool_server_error(message: impl Into<String>) -> ServiceError {
    ServiceError::ToolServer {
        message: message.into(),
    }
}
