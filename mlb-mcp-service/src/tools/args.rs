//! Typed tool arguments.
//!
//! Every tool deserializes its argument object into one of these structs.
//! The same structs generate the JSON Schema advertised in `tools/list`,
//! so argument names, types and defaults come from a single place.
//! Identifiers accept either a JSON number or a numeric string.

use chrono::NaiveDate;
use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use crate::error::{ToolError, ToolResult};

/// Parse a tool's argument object. `null` counts as an empty object.
pub fn parse<T: DeserializeOwned>(tool: &str, args: Value) -> ToolResult<T> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| ToolError::invalid(format!("{} arguments: {}", tool, e)))
}

/// JSON Schema (draft-07, fully inlined) for an argument struct
pub fn schema<T: JsonSchema>() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|s| {
            s.inline_subschemas = true;
            s.meta_schema = None;
        })
        .into_generator();
    let mut schema = serde_json::to_value(generator.into_root_schema_for::<T>())
        .unwrap_or_else(|_| serde_json::json!({ "type": "object" }));
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("title");
        obj.entry("properties")
            .or_insert_with(|| Value::Object(Default::default()));
    }
    schema
}

// ==================== Flexible scalars ====================

mod flex {
    use super::*;

    fn to_u64<E: de::Error>(value: Value) -> Result<u64, E> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| E::custom(format!("expected a positive integer id, got {}", n))),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected a numeric id, got \"{}\"", s))),
            other => Err(E::custom(format!("expected a numeric id, got {}", other))),
        }
    }

    fn to_u32<E: de::Error>(value: Value) -> Result<u32, E> {
        let n = to_u64::<E>(value)?;
        u32::try_from(n).map_err(|_| E::custom(format!("id {} is out of range", n)))
    }

    pub fn u64_id<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        to_u64(Value::deserialize(d)?)
    }

    pub fn u32_id<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        to_u32(Value::deserialize(d)?)
    }

    pub fn opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            v => to_u32(v).map(Some),
        }
    }

    pub fn opt_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            v => to_u64(v).map(Some),
        }
    }

    pub fn opt_i32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            v => {
                let n = to_u64::<D::Error>(v)?;
                i32::try_from(n)
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("{} is out of range", n)))
            }
        }
    }

    /// Strings that callers often send as numbers (seasons, game ids)
    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => Ok(Some(s.trim().to_string())),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(de::Error::custom(format!(
                "expected a string or number, got {}",
                other
            ))),
        }
    }
}

/// One value or several, given as a JSON list or a comma string
/// (optionally bracketed: `[hitting,pitching]`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum StringList {
    One(String),
    Many(Vec<String>),
}

impl StringList {
    pub fn items(&self) -> Vec<String> {
        match self {
            StringList::One(s) => s
                .trim()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split(',')
                .map(|x| x.trim().to_string())
                .filter(|x| !x.is_empty())
                .collect(),
            StringList::Many(items) => items
                .iter()
                .map(|x| x.trim().to_string())
                .filter(|x| !x.is_empty())
                .collect(),
        }
    }
}

/// League ids as a list (`[103, 104]`), a comma string or a single id
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LeagueIds {
    Single(u32),
    Many(Vec<u32>),
    Text(String),
}

impl LeagueIds {
    pub fn to_param(&self) -> String {
        match self {
            LeagueIds::Single(id) => id.to_string(),
            LeagueIds::Many(ids) => ids
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(","),
            LeagueIds::Text(s) => s.trim().to_string(),
        }
    }
}

// ==================== Validation ====================

/// `MM/DD/YYYY`, zero-padded, and a real calendar date
pub fn validate_us_date(arg: &str, value: &str) -> ToolResult<()> {
    let shape_ok = value.len() == 10
        && value.char_indices().all(|(i, c)| match i {
            2 | 5 => c == '/',
            _ => c.is_ascii_digit(),
        });
    if shape_ok && NaiveDate::parse_from_str(value, "%m/%d/%Y").is_ok() {
        Ok(())
    } else {
        Err(ToolError::invalid(format!(
            "{} must be in MM/DD/YYYY format, e.g. '04/24/2019' (got '{}')",
            arg, value
        )))
    }
}

/// `MM/DD/YYYY` or `YYYY-MM-DD`
pub fn validate_schedule_date(arg: &str, value: &str) -> ToolResult<()> {
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() && value.len() == 10 {
        return Ok(());
    }
    validate_us_date(arg, value).map_err(|_| {
        ToolError::invalid(format!(
            "{} must be MM/DD/YYYY or YYYY-MM-DD (got '{}')",
            arg, value
        ))
    })
}

pub fn require_non_empty(arg: &str, value: &str) -> ToolResult<()> {
    if value.trim().is_empty() {
        Err(ToolError::invalid(format!("{} must not be empty", arg)))
    } else {
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_sport() -> u32 {
    1
}

// ==================== Argument structs ====================

/// No arguments
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreArgs {
    /// MLB game id (gamePk), e.g. 565997
    #[serde(deserialize_with = "flex::u64_id")]
    #[schemars(with = "u64")]
    pub game_pk: u64,
    /// Include the batting box
    #[serde(default = "default_true")]
    pub batting_box: bool,
    /// Include batting notes (2B, HR, RBI, ...)
    #[serde(default = "default_true")]
    pub batting_info: bool,
    /// Include fielding notes (E, DP, ...)
    #[serde(default = "default_true")]
    pub fielding_info: bool,
    /// Include the pitching box
    #[serde(default = "default_true", alias = "pichitingBox")]
    pub pitching_box: bool,
    /// Include game info (umpires, weather, attendance)
    #[serde(default = "default_true")]
    pub game_info: bool,
    /// Optional timestamp (YYYYMMDD_HHMMSS) of a past version of the game
    #[serde(default)]
    pub time_code: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GameIdArgs {
    /// MLB game id (gamePk)
    #[serde(rename = "gameID", deserialize_with = "flex::u64_id")]
    #[schemars(with = "u64")]
    pub game_id: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GamePaceArgs {
    /// Season year, defaults to the current year
    #[serde(default, deserialize_with = "flex::opt_i32")]
    #[schemars(with = "Option<i32>")]
    pub season: Option<i32>,
    /// Sport id (1 = MLB)
    #[serde(rename = "sportID", default = "default_sport")]
    pub sport_id: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TeamIdArgs {
    /// MLB team id, e.g. 119 for the Dodgers (see team_id)
    #[serde(rename = "teamID", deserialize_with = "flex::u32_id")]
    #[schemars(with = "u32")]
    pub team_id: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SportArgs {
    /// Sport id (1 = MLB)
    #[serde(rename = "sportID", default = "default_sport")]
    pub sport_id: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LeagueLeaderArgs {
    /// Leader category, e.g. 'homeRuns', 'earnedRunAverage'
    #[serde(rename = "leaderCategories")]
    pub leader_categories: String,
    /// Season year, e.g. '2024'
    #[serde(default, deserialize_with = "flex::opt_string")]
    #[schemars(with = "Option<String>")]
    pub season: Option<String>,
    /// Number of leaders (default 10)
    #[serde(default, deserialize_with = "flex::opt_u32")]
    #[schemars(with = "Option<u32>")]
    pub limit: Option<u32>,
    /// Stat group: hitting, pitching, fielding, catching
    #[serde(rename = "statGroup", default)]
    pub stat_group: Option<String>,
    /// League id: 103 (AL) or 104 (NL)
    #[serde(rename = "leagueID", default, deserialize_with = "flex::opt_u32")]
    #[schemars(with = "Option<u32>")]
    pub league_id: Option<u32>,
    /// Player pool: all, qualified or rookies
    #[serde(rename = "playerPool", default)]
    pub player_pool: Option<String>,
    /// Sport id (1 = MLB)
    #[serde(rename = "sportID", default = "default_sport")]
    pub sport_id: u32,
    /// Stat type, e.g. 'season' or 'career'
    #[serde(rename = "statType", default)]
    pub stat_type: Option<String>,
    /// Game types, comma-separated: R (regular), W (wild card), S (spring)
    #[serde(rename = "gameTypes", default)]
    pub game_types: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LinescoreArgs {
    /// MLB game id (gamePk)
    #[serde(rename = "gameID", deserialize_with = "flex::u64_id")]
    #[schemars(with = "u64")]
    pub game_id: u64,
    /// Optional timestamp (YYYYMMDD_HHMMSS) of a past version of the game
    #[serde(default)]
    pub timecode: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LookupPlayerArgs {
    /// Full or partial player name, e.g. 'Mike Trout'
    pub player_name: String,
    /// Season to search, defaults to the current season
    #[serde(default, deserialize_with = "flex::opt_string")]
    #[schemars(with = "Option<String>")]
    pub season: Option<String>,
}

fn default_active_status() -> String {
    "Y".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LookupTeamArgs {
    /// Team name, city, abbreviation or code (e.g. 'ny', 'chn', 'boston')
    pub lookup_value: String,
    /// Y (active), N (inactive) or B (both)
    #[serde(rename = "activeStatus", default = "default_active_status")]
    pub active_status: String,
    /// Season year for historical teams
    #[serde(default, deserialize_with = "flex::opt_string")]
    #[schemars(with = "Option<String>")]
    pub season: Option<String>,
    /// Sport id (1 = MLB)
    #[serde(rename = "sportIds", default = "default_sport")]
    pub sport_ids: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PlayerStatArgs {
    /// MLB person id, e.g. 545361 (see lookup_player)
    #[serde(rename = "personID", deserialize_with = "flex::u64_id")]
    #[schemars(with = "u64")]
    pub person_id: u64,
    /// Stat groups: hitting, pitching, fielding
    #[serde(default)]
    pub group: Option<StringList>,
    /// Stat types, e.g. season, career, yearByYear
    #[serde(rename = "type", default)]
    pub stat_type: Option<StringList>,
    /// Season year; only used when type includes 'season'
    #[serde(default, deserialize_with = "flex::opt_string")]
    #[schemars(with = "Option<String>")]
    pub season: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RosterArgs {
    /// MLB team id, e.g. 119 for the Dodgers
    #[serde(deserialize_with = "flex::u32_id")]
    #[schemars(with = "u32")]
    pub team_id: u32,
    /// Roster type, e.g. 'active', '40Man'
    #[serde(rename = "rosterType", default)]
    pub roster_type: Option<String>,
    /// Season year
    #[serde(default, deserialize_with = "flex::opt_u32")]
    #[schemars(with = "Option<u32>")]
    pub season: Option<u32>,
    /// Date in MM/DD/YYYY; overrides season
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScheduleArgs {
    /// Single date, MM/DD/YYYY or YYYY-MM-DD
    #[serde(default)]
    pub date: Option<String>,
    /// Start of a date range, MM/DD/YYYY or YYYY-MM-DD
    #[serde(default)]
    pub start_date: Option<String>,
    /// End of a date range, MM/DD/YYYY or YYYY-MM-DD
    #[serde(default)]
    pub end_date: Option<String>,
    /// MLB team id (e.g. 143 for the Phillies)
    #[serde(default, deserialize_with = "flex::opt_u32")]
    #[schemars(with = "Option<u32>")]
    pub team_id: Option<u32>,
    /// Opponent team id, for head-to-head matchups
    #[serde(default, deserialize_with = "flex::opt_u32")]
    #[schemars(with = "Option<u32>")]
    pub opponent_id: Option<u32>,
    /// Sport id (1 = MLB)
    #[serde(default = "default_sport")]
    pub sport_id: u32,
    /// A single game id
    #[serde(default, deserialize_with = "flex::opt_u64")]
    #[schemars(with = "Option<u64>")]
    pub game_id: Option<u64>,
    /// Season year, e.g. '2023'
    #[serde(default, deserialize_with = "flex::opt_string")]
    #[schemars(with = "Option<String>")]
    pub season: Option<String>,
    /// Include series status for each game
    #[serde(default = "default_true")]
    pub include_series_status: bool,
}

fn default_division() -> String {
    "all".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StandingsArgs {
    /// League ids as a list ([103, 104]) or comma string ("103,104")
    #[serde(rename = "leagueID", default)]
    pub league_id: Option<LeagueIds>,
    /// 'all' or a division id, name or abbreviation
    #[serde(default = "default_division")]
    pub division: String,
    /// Include wild card columns
    #[serde(rename = "includeWildcard", default = "default_true")]
    pub include_wildcard: bool,
    /// Season year, e.g. '2025'
    #[serde(default, deserialize_with = "flex::opt_string")]
    #[schemars(with = "Option<String>")]
    pub season: Option<String>,
    /// Standings types, e.g. 'regularSeason'
    #[serde(rename = "standingsTypes", default)]
    pub standings_types: Option<String>,
    /// Date in MM/DD/YYYY
    #[serde(default)]
    pub date: Option<String>,
    /// Also return the structured standings
    #[serde(rename = "includeJson", default = "default_true")]
    pub include_json: bool,
}

fn default_game_types() -> String {
    "R".to_string()
}

fn default_team_leader_limit() -> u32 {
    5
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TeamLeadersArgs {
    /// MLB team id
    #[serde(rename = "teamID", deserialize_with = "flex::u32_id")]
    #[schemars(with = "u32")]
    pub team_id: u32,
    /// One category or a list, e.g. 'homeRuns' or ['homeRuns', 'walks']
    #[serde(rename = "leaderCategories")]
    pub leader_categories: StringList,
    /// Season year, defaults to the current year
    #[serde(default, deserialize_with = "flex::opt_i32")]
    #[schemars(with = "Option<i32>")]
    pub season: Option<i32>,
    /// Game type code (R = regular season)
    #[serde(rename = "leaderGameTypes", default = "default_game_types")]
    pub leader_game_types: String,
    /// Leaders per category (default 5)
    #[serde(default = "default_team_leader_limit")]
    pub limit: u32,
    /// Also return the structured leader data
    #[serde(rename = "includeJson", default)]
    pub include_json: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TeamNameArgs {
    /// Team name, abbreviation or nickname, e.g. 'Dodgers', 'LAD'
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToolSearchArgs {
    /// What you want to do, e.g. 'team roster', 'who leads in home runs'
    pub query: String,
    /// Maximum number of results (default 5, max 10)
    #[serde(default)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let args: BoxscoreArgs = parse("boxscore", json!({"gamePk": "565997"})).unwrap();
        assert_eq!(args.game_pk, 565997);
        assert!(args.batting_box && args.pitching_box && args.game_info);

        let args: RosterArgs = parse("roster", json!({"team_id": 119})).unwrap();
        assert_eq!(args.team_id, 119);
    }

    #[test]
    fn test_missing_required_names_argument() {
        let err = parse::<RosterArgs>("roster", json!({})).unwrap_err();
        assert_eq!(err.rpc_code(), -32602);
        assert!(err.to_string().contains("team_id"));

        let err = parse::<BoxscoreArgs>("boxscore", Value::Null).unwrap_err();
        assert!(err.to_string().contains("gamePk"));
    }

    #[test]
    fn test_bad_id_rejected() {
        let err = parse::<GameIdArgs>("linescore", json!({"gameID": "abc"})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
        assert!(parse::<GameIdArgs>("linescore", json!({"gameID": -5})).is_err());
    }

    #[test]
    fn test_legacy_pitching_alias() {
        let args: BoxscoreArgs =
            parse("boxscore", json!({"gamePk": 1, "pichitingBox": false})).unwrap();
        assert!(!args.pitching_box);
    }

    #[test]
    fn test_string_list_forms() {
        assert_eq!(
            StringList::One("[hitting, pitching]".to_string()).items(),
            vec!["hitting", "pitching"]
        );
        assert_eq!(StringList::One("season".to_string()).items(), vec!["season"]);
        assert_eq!(
            StringList::Many(vec!["career".to_string(), " ".to_string()]).items(),
            vec!["career"]
        );
    }

    #[test]
    fn test_league_ids_forms() {
        let args: StandingsArgs = parse("standings", json!({"leagueID": [103, 104]})).unwrap();
        assert_eq!(args.league_id.unwrap().to_param(), "103,104");

        let args: StandingsArgs = parse("standings", json!({"leagueID": "104"})).unwrap();
        assert_eq!(args.league_id.unwrap().to_param(), "104");

        let args: StandingsArgs = parse("standings", json!({"leagueID": 103})).unwrap();
        assert_eq!(args.league_id.unwrap().to_param(), "103");
        assert_eq!(args.division, "all");
        assert!(args.include_json);
    }

    #[test]
    fn test_season_accepts_number() {
        let args: LookupPlayerArgs =
            parse("lookup_player", json!({"player_name": "Trout", "season": 2019})).unwrap();
        assert_eq!(args.season.as_deref(), Some("2019"));
    }

    #[test]
    fn test_date_validation() {
        assert!(validate_us_date("date", "04/24/2019").is_ok());
        assert!(validate_us_date("date", "4/24/2019").is_err());
        assert!(validate_us_date("date", "2019-04-24").is_err());
        assert!(validate_us_date("date", "02/30/2019").is_err());

        assert!(validate_schedule_date("date", "2019-04-24").is_ok());
        assert!(validate_schedule_date("date", "04/24/2019").is_ok());
        assert!(validate_schedule_date("date", "April 24").is_err());
    }

    #[test]
    fn test_schema_shape() {
        let roster = schema::<RosterArgs>();
        assert_eq!(roster["type"], "object");
        assert!(roster["properties"]["team_id"].is_object());
        assert!(roster["properties"]["rosterType"].is_object());
        let required: Vec<&str> = roster["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, vec!["team_id"]);

        let empty = schema::<NoArgs>();
        assert_eq!(empty["type"], "object");
        assert!(empty["properties"].as_object().unwrap().is_empty());
    }
}
