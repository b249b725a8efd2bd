use serde_json::Value;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{ServiceError, ServiceResult, ToolResult};
use crate::statsapi::StatsApiClient;
use crate::teams::TeamTable;
use crate::tools::{self, ToolOutput};

/// Main service coordinator.
///
/// Holds the read-only state every tool call shares. Cloning the Stats
/// API client is cheap, and nothing here is mutated after startup.
pub struct MlbService {
    config: AppConfig,
    stats: StatsApiClient,
    teams: TeamTable,
}

impl MlbService {
    /// Create the service from loaded configuration
    pub fn new(config: AppConfig) -> ServiceResult<Self> {
        info!("Initializing MLB MCP service");

        let stats = StatsApiClient::new(&config.stats_api).map_err(|e| ServiceError::Config {
            message: format!("Stats API client: {}", e),
        })?;
        info!(
            url = %config.stats_api.base_url,
            timeout_secs = config.stats_api.timeout_secs,
            "Stats API client initialized"
        );

        let teams = TeamTable::load(config.teams.path.as_deref())?;
        info!(
            teams = teams.len(),
            source = %config
                .teams
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string()),
            "Team table loaded"
        );

        Ok(Self::from_parts(config, stats, teams))
    }

    pub fn from_parts(config: AppConfig, stats: StatsApiClient, teams: TeamTable) -> Self {
        Self {
            config,
            stats,
            teams,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn stats(&self) -> &StatsApiClient {
        &self.stats
    }

    pub fn teams(&self) -> &TeamTable {
        &self.teams
    }

    /// Invoke a tool by name
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolResult<ToolOutput> {
        tools::execute(self, name, arguments).await
    }
}
