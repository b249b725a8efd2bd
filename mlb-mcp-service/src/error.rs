use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::statsapi::StatsApiError;

/// Main service error type
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Tool(#[from] ToolError),

    #[error("{0}")]
    Ollama(#[from] OllamaError),

    #[error("Team table error: {message}")]
    TeamTable { message: String },

    #[error("Tool server error: {message}")]
    ToolServer { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Failure of a single tool invocation.
///
/// Every handler reports one of these; none of them is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Upstream unavailable: {message}")]
    Upstream {
        message: String,
        status: Option<u16>,
    },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },
}

impl ToolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ToolError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ToolError::Upstream {
            message: message.into(),
            status: None,
        }
    }

    /// JSON-RPC error code for this failure
    pub fn rpc_code(&self) -> i32 {
        match self {
            ToolError::InvalidArgument { .. } => -32602,
            ToolError::Upstream { .. } => -32000,
            ToolError::UnknownTool { .. } => -32601,
        }
    }

    /// Stable machine-readable kind, also used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::InvalidArgument { .. } => "invalid_argument",
            ToolError::Upstream { .. } => "upstream_unavailable",
            ToolError::UnknownTool { .. } => "unknown_tool",
        }
    }
}

impl From<StatsApiError> for ToolError {
    fn from(error: StatsApiError) -> Self {
        let status = match &error {
            StatsApiError::Api { status, .. } => Some(*status),
            StatsApiError::Request(e) => e.status().map(|s| s.as_u16()),
            StatsApiError::NotFound { .. } => Some(404),
            StatsApiError::Decode { .. } => None,
        };
        ToolError::Upstream {
            message: error.to_string(),
            status,
        }
    }
}

/// Language model client errors
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Connection failed to model endpoint at {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Generation failed (status {status}): {message}")]
    Generation { status: u16, message: String },

    #[error("Invalid response from model endpoint")]
    InvalidResponse {
        #[source]
        source: serde_json::Error,
    },
}

/// API error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Tool(ToolError::InvalidArgument { .. })
            | ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Tool(ToolError::UnknownTool { .. })
            | ServiceError::Ollama(OllamaError::ModelNotFound { .. }) => StatusCode::NOT_FOUND,
            ServiceError::Tool(ToolError::Upstream { .. })
            | ServiceError::ToolServer { .. }
            | ServiceError::Ollama(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Tool(e) => e.kind(),
            ServiceError::Ollama(OllamaError::Connection { .. }) => "model_connection",
            ServiceError::Ollama(OllamaError::ModelNotFound { .. }) => "model_not_found",
            ServiceError::Ollama(OllamaError::Generation { .. }) => "model_generation",
            ServiceError::Ollama(OllamaError::InvalidResponse { .. }) => "model_invalid_response",
            ServiceError::TeamTable { .. } => "team_table_error",
            ServiceError::ToolServer { .. } => "tool_server_error",
            ServiceError::InvalidRequest { .. } => "invalid_request",
            ServiceError::Config { .. } => "config_error",
            ServiceError::Io(_) => "io_error",
            ServiceError::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        let response = ErrorResponse {
            message: self.to_string(),
            code: Some(code),
        };

        (status, Json(response)).into_response()
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for tool handlers
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_codes() {
        assert_eq!(ToolError::invalid("x").rpc_code(), -32602);
        assert_eq!(ToolError::upstream("x").rpc_code(), -32000);
        assert_eq!(
            ToolError::UnknownTool {
                name: "nope".to_string()
            }
            .rpc_code(),
            -32601
        );
    }

    #[test]
    fn test_stats_api_error_maps_to_upstream() {
        let error: ToolError = StatsApiError::Api {
            status: 404,
            message: "Object not found".to_string(),
        }
        .into();
        match error {
            ToolError::Upstream { status, message } => {
                assert_eq!(status, Some(404));
                assert!(message.contains("Object not found"));
            }
            other => panic!("Expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn test_service_error_status() {
        let err = ServiceError::Tool(ToolError::invalid("gamePk is required"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "invalid_argument");

        let err = ServiceError::Tool(ToolError::upstream("down"));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
