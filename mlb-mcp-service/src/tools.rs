//! MLB tools: registry, typed arguments and execution.
//!
//! Both the MCP server and the chat front-end call tools through
//! [`execute`]. Each tool validates its arguments, makes its Stats API
//! request(s) and returns a single [`ToolOutput`].

pub mod args;
mod game;
mod league;
mod player;
pub mod registry;
mod team;
mod tool_defs;
pub mod tool_search;
mod utility;

use std::str::FromStr;
use std::time::Instant;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ToolError, ToolResult};
use crate::service::MlbService;

pub use registry::{McpToolDefinition, REGISTRY, ToolName};

/// Result of a successful tool call
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Json(Value),
}

impl ToolOutput {
    /// Text for an MCP `content` block: the string itself or pretty JSON
    pub fn to_text(&self) -> String {
        match self {
            ToolOutput::Text(text) => text.clone(),
            ToolOutput::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    /// Structured payload, present for JSON outputs only
    pub fn structured(&self) -> Option<&Value> {
        match self {
            ToolOutput::Text(_) => None,
            ToolOutput::Json(value) => Some(value),
        }
    }
}

/// Run a tool by name
pub async fn execute(service: &MlbService, name: &str, arguments: Value) -> ToolResult<ToolOutput> {
    let tool = ToolName::from_str(name).map_err(|_| ToolError::UnknownTool {
        name: name.to_string(),
    })?;

    let started = Instant::now();
    let result = dispatch(service, tool, arguments).await;
    let elapsed = started.elapsed();

    let outcome = match &result {
        Ok(_) => {
            info!(tool = %tool, elapsed_ms = elapsed.as_millis() as u64, "Tool call succeeded");
            "ok"
        }
        Err(e) => {
            warn!(tool = %tool, kind = e.kind(), error = %e, "Tool call failed");
            e.kind()
        }
    };

    metrics::counter!(
        "mlb_tool_calls_total",
        "tool" => tool.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("mlb_tool_call_duration_seconds", "tool" => tool.to_string())
        .record(elapsed.as_secs_f64());

    result
}

async fn dispatch(service: &MlbService, tool: ToolName, arguments: Value) -> ToolResult<ToolOutput> {
    match tool {
        // Game tools
        ToolName::Boxscore => game::execute_boxscore(service, arguments).await,
        ToolName::GameHighlightData => game::execute_game_highlight_data(service, arguments).await,
        ToolName::GamePaceData => game::execute_game_pace_data(service, arguments).await,
        ToolName::ScoringPlayData => game::execute_scoring_play_data(service, arguments).await,
        ToolName::Linescore => game::execute_linescore(service, arguments).await,
        ToolName::GameSchedule => game::execute_game_schedule(service, arguments).await,

        // Team tools
        ToolName::LastGame => team::execute_last_game(service, arguments).await,
        ToolName::NextGame => team::execute_next_game(service, arguments).await,
        ToolName::LookupTeam => team::execute_lookup_team(service, arguments).await,
        ToolName::Roster => team::execute_roster(service, arguments).await,
        ToolName::TeamLeaders => team::execute_team_leaders(service, arguments).await,
        ToolName::TeamId => team::execute_team_id(service, arguments),

        // Player tools
        ToolName::LookupPlayer => player::execute_lookup_player(service, arguments).await,
        ToolName::PlayerStatData => player::execute_player_stat_data(service, arguments).await,

        // League tools
        ToolName::LatestSeason => league::execute_latest_season(service, arguments).await,
        ToolName::LeagueLeaderData => league::execute_league_leader_data(service, arguments).await,
        ToolName::Standings => league::execute_standings(service, arguments).await,

        // Utility tools
        ToolName::Date => utility::execute_date(arguments),
        ToolName::ToolSearch => utility::execute_tool_search(arguments),
    }
}

/// Current year in local time, the default season
fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}
