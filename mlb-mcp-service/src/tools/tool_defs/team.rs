//! Team tool definitions.

use std::collections::HashMap;

use crate::tools::{
    args::{self, LookupTeamArgs, RosterArgs, TeamIdArgs, TeamLeadersArgs, TeamNameArgs},
    registry::{ToolMetadata, ToolName},
};

pub fn register(registry: &mut HashMap<ToolName, ToolMetadata>) {
    let tools = [
        last_game(),
        next_game(),
        lookup_team(),
        roster(),
        team_leaders(),
        team_id(),
    ];
    for tool in tools {
        registry.insert(tool.name, tool);
    }
}

fn last_game() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::LastGame,
        description: "Get the game id (gamePk) of a team's most recent completed game.",
        category: "team",
        parameters: args::schema::<TeamIdArgs>,
    }
}

fn next_game() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::NextGame,
        description: "Get the game id (gamePk) of a team's next scheduled game.",
        category: "team",
        parameters: args::schema::<TeamIdArgs>,
    }
}

fn lookup_team() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::LookupTeam,
        description: "Search the Stats API for teams by name, city, abbreviation or file code. Includes inactive and historical teams when asked.",
        category: "team",
        parameters: args::schema::<LookupTeamArgs>,
    }
}

fn roster() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::Roster,
        description: "Get a team's roster: jersey number, position and name of each player. Supports roster types such as 'active' and '40Man', and a past season or date.",
        category: "team",
        parameters: args::schema::<RosterArgs>,
    }
}

fn team_leaders() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::TeamLeaders,
        description: "Get a team's leaders in one or more stat categories (e.g. homeRuns, walks, earnedRunAverage) for a season.",
        category: "team",
        parameters: args::schema::<TeamLeadersArgs>,
    }
}

fn team_id() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::TeamId,
        description: "Resolve a team name, nickname or abbreviation to its MLB team id without calling the Stats API.",
        category: "team",
        parameters: args::schema::<TeamNameArgs>,
    }
}
