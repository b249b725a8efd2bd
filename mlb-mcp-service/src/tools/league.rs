//! League-wide tool implementations.

use serde_json::{Value, json};
use tracing::debug;

use super::ToolOutput;
use super::args::{self, LeagueLeaderArgs, SportArgs, StandingsArgs};
use crate::error::{ToolError, ToolResult};
use crate::service::MlbService;
use crate::statsapi::responses::{self, LeagueLeadersResponse};
use crate::statsapi::{LeadersQuery, StandingsQuery, data, format};

const PLAYER_POOLS: [&str; 3] = ["all", "qualified", "rookies"];

pub(super) async fn execute_latest_season(
    service: &MlbService,
    arguments: Value,
) -> ToolResult<ToolOutput> {
    let args: SportArgs = args::parse("latest_season", arguments)?;

    let response = service.stats().seasons(args.sport_id).await?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let season = data::latest_season(&response.seasons, &today)
        .ok_or_else(|| ToolError::upstream(format!("No seasons listed for sport {}", args.sport_id)))?;
    debug!(season = %season.season_id, "Resolved latest season");

    Ok(ToolOutput::Json(json!({
        "query": { "sportId": args.sport_id },
        "season": season,
    })))
}

pub(super) async fn execute_league_leader_data(
    service: &MlbService,
    arguments: Value,
) -> ToolResult<ToolOutput> {
    let args: LeagueLeaderArgs = args::parse("league_leader_data", arguments)?;
    args::require_non_empty("leaderCategories", &args.leader_categories)?;

    let player_pool = match args.player_pool {
        Some(pool) => {
            let pool = pool.trim().to_lowercase();
            if !PLAYER_POOLS.contains(&pool.as_str()) {
                return Err(ToolError::invalid(format!(
                    "playerPool must be one of {:?} (got '{}')",
                    PLAYER_POOLS, pool
                )));
            }
            Some(pool)
        }
        None => None,
    };

    let query = LeadersQuery {
        season: args.season,
        limit: args.limit.unwrap_or(10),
        stat_group: args.stat_group.filter(|s| !s.is_empty()),
        league_id: args.league_id,
        player_pool,
        sport_id: args.sport_id,
        stat_type: args.stat_type.filter(|s| !s.is_empty()),
        game_types: args.game_types.filter(|s| !s.is_empty()),
        ..LeadersQuery::new(args.leader_categories.trim())
    };

    let raw = service.stats().league_leaders(&query).await?;
    let parsed: LeagueLeadersResponse = responses::view("stats_leaders", &raw)?;
    let leaders = data::leader_data(&parsed.league_leaders);
    debug!(
        category = %query.leader_categories,
        categories = leaders.len(),
        "League leaders"
    );

    Ok(ToolOutput::Json(json!({
        "query": {
            "leaderCategories": query.leader_categories,
            "season": query.season,
            "limit": query.limit,
            "statGroup": query.stat_group,
            "leagueId": query.league_id,
            "gameTypes": query.game_types,
            "playerPool": query.player_pool,
            "sportId": query.sport_id,
            "statType": query.stat_type,
        },
        "formatted": format::leaders(&leaders),
        "leaders": leaders,
    })))
}

pub(super) async fn execute_standings(service: &MlbService, arguments: Value) -> ToolResult<ToolOutput> {
    let args: StandingsArgs = args::parse("standings", arguments)?;
    if let Some(date) = &args.date {
        args::validate_us_date("date", date)?;
    }

    let mut query = StandingsQuery {
        season: args.season,
        standings_types: args.standings_types.filter(|s| !s.is_empty()),
        date: args.date,
        ..StandingsQuery::default()
    };
    if let Some(ids) = args.league_id.as_ref().map(|l| l.to_param()) {
        if !ids.is_empty() {
            query.league_ids = ids;
        }
    }

    let response = service.stats().standings(&query).await?;
    let divisions = data::standings_data(&response.records, &args.division, args.include_wildcard);
    debug!(
        leagues = %query.league_ids,
        divisions = divisions.len(),
        "Standings"
    );

    let formatted = format::standings(&divisions, args.include_wildcard);
    let json = if args.include_json {
        serde_json::to_value(&divisions).unwrap_or(Value::Null)
    } else {
        Value::Null
    };

    Ok(ToolOutput::Json(json!({
        "query": {
            "leagueId": query.league_ids,
            "division": args.division,
            "include_wildcard": args.include_wildcard,
            "season": query.season,
            "standingsTypes": query.standings_types,
            "date": query.date,
            "includeJson": args.include_json,
        },
        "formatted": formatted,
        "json": json,
    })))
}
