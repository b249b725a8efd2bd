//! Game-level tool definitions: boxscores, linescores, plays, schedules.

use std::collections::HashMap;

use crate::tools::{
    args::{self, BoxscoreArgs, GameIdArgs, GamePaceArgs, LinescoreArgs, ScheduleArgs},
    registry::{ToolMetadata, ToolName},
};

pub fn register(registry: &mut HashMap<ToolName, ToolMetadata>) {
    let tools = [
        boxscore(),
        game_highlight_data(),
        game_pace_data(),
        scoring_play_data(),
        linescore(),
        game_schedule(),
    ];
    for tool in tools {
        registry.insert(tool.name, tool);
    }
}

fn boxscore() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::Boxscore,
        description: "Get a formatted boxscore for a game: batting and pitching lines, batting and fielding notes, and game info (umpires, weather, attendance). Each section can be switched off. Also returns the raw boxscore JSON.",
        category: "game",
        parameters: args::schema::<BoxscoreArgs>,
    }
}

fn game_highlight_data() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::GameHighlightData,
        description: "List the video highlights for a game with headline, duration, description and video URL.",
        category: "game",
        parameters: args::schema::<GameIdArgs>,
    }
}

fn game_pace_data() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::GamePaceData,
        description: "Get league-wide game pace statistics (game duration, pitches and plate appearances per game) for a season.",
        category: "game",
        parameters: args::schema::<GamePaceArgs>,
    }
}

fn scoring_play_data() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::ScoringPlayData,
        description: "List every scoring play of a game with inning and running score.",
        category: "game",
        parameters: args::schema::<GameIdArgs>,
    }
}

fn linescore() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::Linescore,
        description: "Get the inning-by-inning linescore of a game (runs, hits, errors). Pass a timecode to see the game as it stood at that moment.",
        category: "game",
        parameters: args::schema::<LinescoreArgs>,
    }
}

fn game_schedule() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::GameSchedule,
        description: "Find games by date, date range, team, opponent, season or game id. Returns each game's id, teams, score, status, probable pitchers and decisions. Use this to find a gamePk for the other game tools.",
        category: "game",
        parameters: args::schema::<ScheduleArgs>,
    }
}
