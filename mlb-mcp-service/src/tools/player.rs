//! Player tool implementations.

use serde_json::{Value, json};
use tracing::{debug, info};

use super::args::{self, LookupPlayerArgs, PlayerStatArgs};
use super::{ToolOutput, current_year};
use crate::error::{ToolError, ToolResult};
use crate::service::MlbService;
use crate::statsapi::{PersonStatsQuery, data, format};

const ALLOWED_GROUPS: [&str; 3] = ["hitting", "pitching", "fielding"];

/// Stat types the text formatter understands
const FORMATTABLE_TYPES: [&str; 2] = ["career", "season"];

pub(super) async fn execute_lookup_player(
    service: &MlbService,
    arguments: Value,
) -> ToolResult<ToolOutput> {
    let args: LookupPlayerArgs = args::parse("lookup_player", arguments)?;
    args::require_non_empty("player_name", &args.player_name)?;
    let season = args.season.unwrap_or_else(|| current_year().to_string());

    let response = service.stats().sports_players(1, Some(&season)).await?;
    let people = data::lookup_player(&response.people, &args.player_name);
    if people.is_empty() {
        info!(player = %args.player_name, %season, "No players found");
        return Err(ToolError::invalid(format!(
            "No players found matching '{}' in {}",
            args.player_name, season
        )));
    }
    debug!(player = %args.player_name, count = people.len(), "Player lookup");

    Ok(ToolOutput::Json(json!({
        "query": { "player_name": args.player_name, "season": season },
        "count": people.len(),
        "people": people,
    })))
}

pub(super) async fn execute_player_stat_data(
    service: &MlbService,
    arguments: Value,
) -> ToolResult<ToolOutput> {
    let args: PlayerStatArgs = args::parse("player_stat_data", arguments)?;

    let groups = args.group.map(|g| g.items()).unwrap_or_default();
    if let Some(bad) = groups.iter().find(|g| !ALLOWED_GROUPS.contains(&g.as_str())) {
        return Err(ToolError::invalid(format!(
            "group must be a subset of {:?}; got '{}'",
            ALLOWED_GROUPS, bad
        )));
    }
    let types = args.stat_type.map(|t| t.items()).unwrap_or_default();

    let mut warnings: Vec<String> = Vec::new();
    let season = match args.season {
        Some(_) if !types.iter().any(|t| t == "season") => {
            warnings.push(
                "`season` was provided but `type` does not include 'season'; season will be ignored."
                    .to_string(),
            );
            None
        }
        season => season,
    };

    let can_format = types.iter().all(|t| FORMATTABLE_TYPES.contains(&t.as_str()));
    if !can_format {
        warnings.push(
            "Formatted output not available for requested `type`; returning JSON only.".to_string(),
        );
    }

    let query = PersonStatsQuery {
        groups,
        types,
        season,
    };
    let (_, parsed) = service.stats().person(args.person_id, &query).await?;
    let person = parsed.people.first().ok_or_else(|| ToolError::Upstream {
        message: format!("No person with id {}", args.person_id),
        status: Some(404),
    })?;

    let stats = data::player_stat_data(person);
    let formatted = can_format.then(|| format::player_stats(&stats));
    debug!(
        person_id = args.person_id,
        blocks = stats.stats.len(),
        formatted = formatted.is_some(),
        "Player stats"
    );

    Ok(ToolOutput::Json(json!({
        "query": {
            "personId": args.person_id,
            "group": query.groups,
            "type": query.types,
            "season": query.season,
        },
        "warnings": warnings,
        "formatted": formatted,
        "json": stats,
    })))
}
