//! League-wide tool definitions.

use std::collections::HashMap;

use crate::tools::{
    args::{self, LeagueLeaderArgs, SportArgs, StandingsArgs},
    registry::{ToolMetadata, ToolName},
};

pub fn register(registry: &mut HashMap<ToolName, ToolMetadata>) {
    let tools = [latest_season(), league_leader_data(), standings()];
    for tool in tools {
        registry.insert(tool.name, tool);
    }
}

fn latest_season() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::LatestSeason,
        description: "Get the current (or most recent) season with its key dates: spring training, regular season, postseason.",
        category: "league",
        parameters: args::schema::<SportArgs>,
    }
}

fn league_leader_data() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::LeagueLeaderData,
        description: "Get league leaders in a stat category (e.g. homeRuns, battingAverage, strikeouts). Filter by season, league, stat group, player pool and game type.",
        category: "league",
        parameters: args::schema::<LeagueLeaderArgs>,
    }
}

fn standings() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::Standings,
        description: "Get division standings (wins, losses, games back, wild card) for the American and/or National League, for a season or as of a date.",
        category: "league",
        parameters: args::schema::<StandingsArgs>,
    }
}
