//! Tool registry shared by the MCP server and the chat front-end.
//!
//! Tool names are derived from enum variants via strum, so the name a
//! caller sends, the name advertised in `tools/list` and the handler that
//! runs can never drift apart.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// All tool names as an exhaustive enum.
///
/// Adding a new tool requires:
/// 1. Add variant here
/// 2. Register metadata in the matching `tool_defs` module
/// 3. Add a handler arm in `tools::execute` (compile error if missing)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    // ==========================================
    // Game tools
    // ==========================================
    Boxscore,
    GameHighlightData,
    GamePaceData,
    ScoringPlayData,
    Linescore,
    GameSchedule,

    // ==========================================
    // Team tools
    // ==========================================
    LastGame,
    NextGame,
    LookupTeam,
    Roster,
    TeamLeaders,
    TeamId,

    // ==========================================
    // Player tools
    // ==========================================
    LookupPlayer,
    PlayerStatData,

    // ==========================================
    // League tools
    // ==========================================
    LatestSeason,
    LeagueLeaderData,
    Standings,

    // ==========================================
    // Utility tools
    // ==========================================
    Date,
    ToolSearch,
}

/// Metadata for a tool definition.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    /// Tool identifier, rendered via strum Display
    pub name: ToolName,

    pub description: &'static str,

    /// Tool category for organizational purposes (e.g., "game", "team")
    pub category: &'static str,

    /// JSON Schema for tool parameters (called lazily to avoid static initialization issues)
    pub parameters: fn() -> serde_json::Value,
}

/// Central registry of all tools.
pub struct ToolRegistry {
    tools: HashMap<ToolName, ToolMetadata>,
}

impl ToolRegistry {
    /// Build the registry from all registered tool definitions
    pub fn new() -> Self {
        let mut tools = HashMap::new();

        super::tool_defs::register_all_tools(&mut tools);

        Self { tools }
    }

    /// All tools as MCP tool definitions, in declaration order
    pub fn mcp_definitions(&self) -> Vec<McpToolDefinition> {
        ToolName::iter()
            .filter_map(|name| self.get(name))
            .map(|t| McpToolDefinition {
                name: t.name.to_string(),
                description: t.description.to_string(),
                input_schema: (t.parameters)(),
                category: Some(t.category.to_string()),
            })
            .collect()
    }

    pub fn get(&self, name: ToolName) -> Option<&ToolMetadata> {
        self.tools.get(&name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global singleton registry instance
pub static REGISTRY: LazyLock<ToolRegistry> = LazyLock::new(ToolRegistry::new);

/// Tool definition as advertised by `tools/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
    /// Tool category for organizational purposes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_tool_name_string_conversion() {
        assert_eq!(ToolName::Boxscore.to_string(), "boxscore");
        assert_eq!(ToolName::GameHighlightData.to_string(), "game_highlight_data");
        assert_eq!(ToolName::LeagueLeaderData.to_string(), "league_leader_data");
        assert_eq!(ToolName::TeamId.to_string(), "team_id");
        assert_eq!(ToolName::LatestSeason.to_string(), "latest_season");
    }

    #[test]
    fn test_tool_name_from_string() {
        assert_eq!(ToolName::from_str("roster").unwrap(), ToolName::Roster);
        assert_eq!(
            ToolName::from_str("player_stat_data").unwrap(),
            ToolName::PlayerStatData
        );
        assert!(ToolName::from_str("lastest_season").is_err());
        assert!(ToolName::from_str("unknown_tool").is_err());
    }

    #[test]
    fn test_every_variant_registered() {
        for name in ToolName::iter() {
            assert!(REGISTRY.get(name).is_some(), "{name} has no metadata");
        }
        assert_eq!(REGISTRY.len(), ToolName::iter().count());
    }

    #[test]
    fn test_schemas_are_objects_with_known_required() {
        for tool in REGISTRY.mcp_definitions() {
            let schema = &tool.input_schema;
            assert_eq!(schema["type"], "object", "{}", tool.name);
            let properties = schema["properties"]
                .as_object()
                .unwrap_or_else(|| panic!("{} has no properties", tool.name));
            if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
                for name in required {
                    let name = name.as_str().unwrap();
                    assert!(
                        properties.contains_key(name),
                        "{}: required '{}' missing from properties",
                        tool.name,
                        name
                    );
                }
            }
        }
    }

    #[test]
    fn test_definitions_in_declaration_order() {
        let names: Vec<String> = REGISTRY.mcp_definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names.first().map(String::as_str), Some("boxscore"));
        assert_eq!(names.last().map(String::as_str), Some("tool_search"));
    }
}
