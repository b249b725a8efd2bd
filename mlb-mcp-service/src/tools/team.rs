//! Team tool implementations.

use futures::future::try_join_all;
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use tracing::debug;

use super::args::{self, LookupTeamArgs, RosterArgs, TeamIdArgs, TeamLeadersArgs, TeamNameArgs};
use super::{ToolOutput, current_year};
use crate::error::{ToolError, ToolResult};
use crate::service::MlbService;
use crate::statsapi::data::{self, LeaderData};
use crate::statsapi::{RosterQuery, TeamLeadersQuery, TeamsQuery, format};

pub(super) async fn execute_last_game(service: &MlbService, arguments: Value) -> ToolResult<ToolOutput> {
    let args: TeamIdArgs = args::parse("last_game", arguments)?;

    let team = service.stats().team_schedule(args.team_id, false).await?;
    let game = data::last_game(&team);
    debug!(team_id = args.team_id, ?game, "Resolved last game");

    Ok(ToolOutput::Json(json!({
        "query": { "teamId": args.team_id },
        "last_game": game,
    })))
}

pub(super) async fn execute_next_game(service: &MlbService, arguments: Value) -> ToolResult<ToolOutput> {
    let args: TeamIdArgs = args::parse("next_game", arguments)?;

    let team = service.stats().team_schedule(args.team_id, true).await?;
    let game = data::next_game(&team);
    debug!(team_id = args.team_id, ?game, "Resolved next game");

    Ok(ToolOutput::Json(json!({
        "query": { "teamId": args.team_id },
        "next_game": game,
    })))
}

pub(super) async fn execute_lookup_team(service: &MlbService, arguments: Value) -> ToolResult<ToolOutput> {
    let args: LookupTeamArgs = args::parse("lookup_team", arguments)?;
    args::require_non_empty("lookup_value", &args.lookup_value)?;

    let active_status = args.active_status.trim().to_uppercase();
    if !matches!(active_status.as_str(), "Y" | "N" | "B") {
        return Err(ToolError::invalid(format!(
            "activeStatus must be one of 'Y', 'N' or 'B' (got '{}')",
            args.active_status
        )));
    }

    let query = TeamsQuery {
        active_status,
        season: args.season,
        sport_ids: args.sport_ids,
    };
    let response = service.stats().teams(&query).await?;
    let teams = data::lookup_team(&response.teams, &args.lookup_value);
    debug!(lookup = %args.lookup_value, count = teams.len(), "Team lookup");

    Ok(ToolOutput::Json(json!({
        "query": {
            "lookup_value": args.lookup_value,
            "activeStatus": query.active_status,
            "season": query.season,
            "sportIds": query.sport_ids,
        },
        "count": teams.len(),
        "teams": teams,
    })))
}

pub(super) async fn execute_roster(service: &MlbService, arguments: Value) -> ToolResult<ToolOutput> {
    let args: RosterArgs = args::parse("roster", arguments)?;
    if let Some(date) = &args.date {
        args::validate_us_date("date", date)?;
    }

    let query = RosterQuery {
        roster_type: args.roster_type.filter(|t| !t.trim().is_empty()),
        season: args.season,
        date: args.date,
    };
    let raw = service.stats().team_roster(args.team_id, &query).await?;
    let roster = raw
        .get("roster")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));
    debug!(
        team_id = args.team_id,
        entries = roster.as_array().map(Vec::len).unwrap_or(0),
        "Retrieved roster"
    );

    Ok(ToolOutput::Json(json!({
        "query": {
            "teamId": args.team_id,
            "rosterType": query.roster_type,
            "season": query.season,
            "date": query.date,
        },
        "roster": roster,
        "raw": raw,
    })))
}

pub(super) async fn execute_team_leaders(
    service: &MlbService,
    arguments: Value,
) -> ToolResult<ToolOutput> {
    let args: TeamLeadersArgs = args::parse("team_leaders", arguments)?;
    let mut categories = args.leader_categories.items();
    let mut seen = HashSet::new();
    categories.retain(|category| seen.insert(category.clone()));
    if categories.is_empty() {
        return Err(ToolError::invalid("leaderCategories must name at least one category"));
    }
    let season = args.season.unwrap_or_else(current_year);

    let stats = service.stats();
    let team_id = args.team_id;
    let requests = categories.iter().map(|category| {
        let query = TeamLeadersQuery {
            leader_category: category.clone(),
            season,
            leader_game_types: args.leader_game_types.clone(),
            limit: args.limit,
        };
        async move { stats.team_leaders(team_id, &query).await }
    });
    let responses = try_join_all(requests).await?;

    // One formatted block per requested category, in request order
    let mut formatted = Map::new();
    let mut collected: Vec<LeaderData> = Vec::new();
    for (category, response) in categories.iter().zip(responses) {
        let leaders = data::leader_data(&response.team_leaders);
        let text = leaders
            .first()
            .map(format::team_leaders)
            .unwrap_or_default();
        formatted.insert(category.clone(), Value::String(text));
        collected.extend(leaders);
    }

    let formatted = if categories.len() == 1 {
        formatted
            .remove(&categories[0])
            .unwrap_or_else(|| Value::String(String::new()))
    } else {
        Value::Object(formatted)
    };

    let json = if args.include_json {
        serde_json::to_value(&collected).unwrap_or(Value::Null)
    } else {
        Value::Null
    };

    Ok(ToolOutput::Json(json!({
        "query": {
            "teamID": args.team_id,
            "season": season,
            "leaderCategories": categories,
            "leaderGameTypes": args.leader_game_types,
            "limit": args.limit,
        },
        "formatted": formatted,
        "json": json,
    })))
}

pub(super) fn execute_team_id(service: &MlbService, arguments: Value) -> ToolResult<ToolOutput> {
    let args: TeamNameArgs = args::parse("team_id", arguments)?;
    args::require_non_empty("name", &args.name)?;

    let matches = service.teams().search(&args.name);
    if matches.is_empty() {
        return Err(ToolError::invalid(format!("No team matches '{}'", args.name)));
    }

    Ok(ToolOutput::Json(json!({
        "query": { "name": args.name },
        "matches": matches,
    })))
}
