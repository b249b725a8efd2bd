//! Player tool definitions.

use std::collections::HashMap;

use crate::tools::{
    args::{self, LookupPlayerArgs, PlayerStatArgs},
    registry::{ToolMetadata, ToolName},
};

pub fn register(registry: &mut HashMap<ToolName, ToolMetadata>) {
    let tools = [lookup_player(), player_stat_data()];
    for tool in tools {
        registry.insert(tool.name, tool);
    }
}

fn lookup_player() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::LookupPlayer,
        description: "Find players by full or partial name in a season's player list. Returns each match's person id, team and position. Use the id with player_stat_data.",
        category: "player",
        parameters: args::schema::<LookupPlayerArgs>,
    }
}

fn player_stat_data() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::PlayerStatData,
        description: "Get a player's hitting, pitching or fielding stats (season, career or other stat types). Returns formatted stats for season and career plus the raw data.",
        category: "player",
        parameters: args::schema::<PlayerStatArgs>,
    }
}
