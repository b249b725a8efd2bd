use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ServiceError, ServiceResult};

/// Service configuration, loaded once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_server")]
    pub server: ServerConfig,

    #[serde(default = "default_mcp")]
    pub mcp: McpConfig,

    #[serde(default = "default_stats_api")]
    pub stats_api: StatsApiConfig,

    #[serde(default)]
    pub teams: TeamsConfig,

    #[serde(default = "default_chat")]
    pub chat: ChatConfig,
}

/// How the tool server is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    #[default]
    Stdio,
    /// axum HTTP server (MCP endpoint, health, metrics, chat)
    Http,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: Transport,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// MCP endpoint configuration (HTTP transport)
#[derive(Debug, Clone, Deserialize)]
pub struct McpConfig {
    #[serde(default = "default_mcp_path")]
    pub path: String,

    #[serde(default = "default_mcp_enabled")]
    pub enabled: bool,
}

/// MLB Stats API client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StatsApiConfig {
    #[serde(default = "default_stats_api_url")]
    pub base_url: String,

    #[serde(default = "default_stats_api_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Team reference table source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamsConfig {
    /// Optional JSON file replacing the built-in table
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Chat front-end configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the Ollama-compatible chat endpoint
    #[serde(default = "default_chat_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Deployment region label shown in the status panel
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Command that launches a tool server over stdio. When unset, tools
    /// are called in-process.
    #[serde(default)]
    pub server_cmd: Option<String>,
}

impl ChatConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Split the server command into program and arguments
    pub fn server_command(&self) -> Option<(String, Vec<String>)> {
        let cmd = self.server_cmd.as_deref()?;
        let mut parts = cmd.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some((program, parts.collect()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            mcp: default_mcp(),
            stats_api: default_stats_api(),
            teams: TeamsConfig::default(),
            chat: default_chat(),
        }
    }
}

impl AppConfig {
    /// Load from `config.*` in the working directory and `MLB__*` env vars
    pub fn load() -> ServiceResult<Self> {
        Self::load_from(Config::builder().add_source(File::with_name("config").required(false)))
    }

    fn load_from(builder: ConfigBuilder<DefaultState>) -> ServiceResult<Self> {
        builder
            .add_source(
                Environment::with_prefix("MLB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ServiceError::Config {
                message: format!("Failed to build config: {}", e),
            })?
            .try_deserialize()
            .map_err(|e| ServiceError::Config {
                message: format!("Failed to deserialize config: {}", e),
            })
    }
}

// ==================== Default Value Functions ====================

fn default_server() -> ServerConfig {
    ServerConfig {
        transport: Transport::default(),
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_mcp() -> McpConfig {
    McpConfig {
        path: default_mcp_path(),
        enabled: default_mcp_enabled(),
    }
}

fn default_mcp_path() -> String {
    "/mcp".to_string()
}

fn default_mcp_enabled() -> bool {
    true
}

fn default_stats_api() -> StatsApiConfig {
    StatsApiConfig {
        base_url: default_stats_api_url(),
        timeout_secs: default_stats_api_timeout(),
        user_agent: default_user_agent(),
    }
}

fn default_stats_api_url() -> String {
    "https://statsapi.mlb.com/api".to_string()
}

fn default_stats_api_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("mlb-mcp-service/{}", env!("CARGO_PKG_VERSION"))
}

fn default_chat() -> ChatConfig {
    ChatConfig {
        enabled: false,
        base_url: default_chat_url(),
        model: default_model(),
        region: default_region(),
        temperature: default_temperature(),
        request_timeout_secs: default_request_timeout_secs(),
        server_cmd: None,
    }
}

fn default_chat_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_region() -> String {
    "local".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_request_timeout_secs() -> u64 {
    120
}
