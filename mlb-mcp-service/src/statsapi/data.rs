//! Derived data built from Stats API responses.
//!
//! These reshape raw endpoint payloads into the flatter records callers
//! work with: game summaries, the last/next game of a team, filtered
//! player and team lookups, standings grouped by division.

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

use super::responses::{
    LeaderCategory, LiveFeed, PersonDetail, Play, Player, ScheduleGame, Season, StandingsRecord,
    Team,
};

/// Flattened view of one scheduled game
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub game_id: u64,
    pub game_datetime: String,
    pub game_date: String,
    pub game_type: Option<String>,
    pub status: String,
    pub away_name: String,
    pub home_name: String,
    pub away_id: u32,
    pub home_id: u32,
    pub doubleheader: Option<String>,
    pub game_num: Option<u32>,
    pub home_probable_pitcher: Option<String>,
    pub away_probable_pitcher: Option<String>,
    pub home_pitcher_note: Option<String>,
    pub away_pitcher_note: Option<String>,
    pub away_score: Option<u32>,
    pub home_score: Option<u32>,
    pub current_inning: Option<u32>,
    pub inning_state: Option<String>,
    pub venue_id: Option<u32>,
    pub venue_name: Option<String>,
    pub national_broadcasts: Vec<String>,
    pub series_status: Option<String>,
    pub winning_team: Option<String>,
    pub losing_team: Option<String>,
    pub winning_pitcher: Option<String>,
    pub losing_pitcher: Option<String>,
    pub save_pitcher: Option<String>,
    pub summary: String,
}

impl GameSummary {
    pub fn from_game(game: &ScheduleGame) -> Self {
        let away = &game.teams.away;
        let home = &game.teams.home;
        let game_date = game
            .official_date
            .clone()
            .unwrap_or_else(|| game.game_date.chars().take(10).collect());
        let status = game.status.detailed_state.clone();

        let (winning_team, losing_team) = match (away.is_winner, home.is_winner) {
            (Some(true), _) => (Some(away.team.name.clone()), Some(home.team.name.clone())),
            (_, Some(true)) => (Some(home.team.name.clone()), Some(away.team.name.clone())),
            _ => (None, None),
        };

        let decisions = game.decisions.as_ref();

        let summary = if game.status.is_final() || away.score.is_some() {
            format!(
                "{} - {} ({}) @ {} ({}) ({})",
                game_date,
                away.team.name,
                away.score.unwrap_or(0),
                home.team.name,
                home.score.unwrap_or(0),
                status
            )
        } else {
            format!(
                "{} - {} @ {} ({})",
                game_date, away.team.name, home.team.name, status
            )
        };

        Self {
            game_id: game.game_pk,
            game_datetime: game.game_date.clone(),
            game_date,
            game_type: game.game_type.clone(),
            status,
            away_name: away.team.name.clone(),
            home_name: home.team.name.clone(),
            away_id: away.team.id,
            home_id: home.team.id,
            doubleheader: game.double_header.clone(),
            game_num: game.game_number,
            home_probable_pitcher: home.probable_pitcher.as_ref().map(|p| p.full_name.clone()),
            away_probable_pitcher: away.probable_pitcher.as_ref().map(|p| p.full_name.clone()),
            home_pitcher_note: home.probable_pitcher.as_ref().and_then(|p| p.note.clone()),
            away_pitcher_note: away.probable_pitcher.as_ref().and_then(|p| p.note.clone()),
            away_score: away.score,
            home_score: home.score,
            current_inning: game.linescore.as_ref().and_then(|l| l.current_inning),
            inning_state: game.linescore.as_ref().and_then(|l| l.inning_state.clone()),
            venue_id: game.venue.as_ref().map(|v| v.id),
            venue_name: game.venue.as_ref().map(|v| v.name.clone()),
            national_broadcasts: game
                .broadcasts
                .iter()
                .filter(|b| b.is_national)
                .map(|b| b.name.clone())
                .collect(),
            series_status: game.series_status.as_ref().and_then(|s| s.result.clone()),
            winning_team,
            losing_team,
            winning_pitcher: decisions
                .and_then(|d| d.winner.as_ref())
                .map(|p| p.full_name.clone()),
            losing_pitcher: decisions
                .and_then(|d| d.loser.as_ref())
                .map(|p| p.full_name.clone()),
            save_pitcher: decisions
                .and_then(|d| d.save.as_ref())
                .map(|p| p.full_name.clone()),
            summary,
        }
    }
}

/// Most recent completed game in a team's previous schedule
pub fn last_game(team: &Team) -> Option<u64> {
    let schedule = team.previous_game_schedule.as_ref()?;
    let mut games: Vec<&ScheduleGame> = schedule.games().collect();
    games.sort_by(|a, b| a.game_date.cmp(&b.game_date));
    games
        .iter()
        .rev()
        .find(|g| g.status.is_final())
        .map(|g| g.game_pk)
}

/// Earliest not-yet-final game in a team's next schedule
pub fn next_game(team: &Team) -> Option<u64> {
    let schedule = team.next_game_schedule.as_ref()?;
    let mut games: Vec<&ScheduleGame> = schedule.games().collect();
    games.sort_by(|a, b| a.game_date.cmp(&b.game_date));
    games
        .iter()
        .find(|g| !g.status.is_final())
        .map(|g| g.game_pk)
}

/// The first season that has not ended as of `today` (YYYY-MM-DD),
/// otherwise the last season listed
pub fn latest_season<'a>(seasons: &'a [Season], today: &str) -> Option<&'a Season> {
    seasons
        .iter()
        .find(|s| {
            s.season_end_date
                .as_deref()
                .is_some_and(|end| end >= today)
        })
        .or_else(|| seasons.last())
}

/// Players whose names contain every whitespace-separated part of `lookup`
pub fn lookup_player<'a>(players: &'a [Player], lookup: &str) -> Vec<&'a Player> {
    let parts: Vec<String> = lookup
        .split_whitespace()
        .map(|p| p.to_lowercase())
        .collect();
    if parts.is_empty() {
        return Vec::new();
    }

    players
        .iter()
        .filter(|player| {
            let haystack = [
                Some(player.full_name.as_str()),
                player.first_name.as_deref(),
                player.last_name.as_deref(),
                player.use_name.as_deref(),
                player.boxscore_name.as_deref(),
                player.nick_name.as_deref(),
                player.primary_number.as_deref(),
            ]
            .into_iter()
            .flatten()
            .map(str::to_lowercase)
            .collect::<Vec<_>>();
            let id = player.id.to_string();

            parts
                .iter()
                .all(|part| *part == id || haystack.iter().any(|field| field.contains(part.as_str())))
        })
        .collect()
}

/// Teams whose name, codes or location contain `lookup`
pub fn lookup_team(teams: &[Team], lookup: &str) -> Vec<Value> {
    let needle = lookup.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    teams
        .iter()
        .filter(|team| {
            [
                Some(team.name.as_str()),
                team.team_code.as_deref(),
                team.file_code.as_deref(),
                team.abbreviation.as_deref(),
                team.team_name.as_deref(),
                team.location_name.as_deref(),
                team.short_name.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .map(|team| {
            json!({
                "id": team.id,
                "name": team.name,
                "teamCode": team.team_code,
                "fileCode": team.file_code,
                "teamName": team.team_name,
                "locationName": team.location_name,
                "shortName": team.short_name,
            })
        })
        .collect()
}

/// One stat block of a player
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatBlock {
    #[serde(rename = "type")]
    pub stat_type: String,
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    pub stats: Map<String, Value>,
}

/// Biographical fields plus flattened stat blocks for one player
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatData {
    pub id: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: String,
    pub active: Option<bool>,
    pub current_team: Option<String>,
    pub position: Option<String>,
    pub nickname: Option<String>,
    pub last_played: Option<String>,
    pub mlb_debut: Option<String>,
    pub bat_side: Option<String>,
    pub pitch_hand: Option<String>,
    pub stats: Vec<PlayerStatBlock>,
}

pub fn player_stat_data(person: &PersonDetail) -> PlayerStatData {
    let stats = person
        .stats
        .iter()
        .flat_map(|entry| {
            entry.splits.iter().map(move |split| PlayerStatBlock {
                stat_type: entry.stat_type.display_name.clone(),
                group: entry.group.display_name.clone(),
                season: split.season.clone(),
                stats: split.stat.clone(),
            })
        })
        .collect();

    PlayerStatData {
        id: person.id,
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        full_name: person.full_name.clone(),
        active: person.active,
        current_team: person.current_team.as_ref().map(|t| t.name.clone()),
        position: person
            .primary_position
            .as_ref()
            .and_then(|p| p.abbreviation.clone()),
        nickname: person.nick_name.clone(),
        last_played: person.last_played_date.clone(),
        mlb_debut: person.mlb_debut_date.clone(),
        bat_side: person.bat_side.as_ref().map(|s| s.description.clone()),
        pitch_hand: person.pitch_hand.as_ref().map(|s| s.description.clone()),
        stats,
    }
}

/// One team line within a division
#[derive(Debug, Clone, Serialize)]
pub struct StandingsRow {
    pub name: String,
    pub team_id: u32,
    pub div_rank: String,
    pub w: u32,
    pub l: u32,
    pub gb: String,
    pub elim_num: String,
    pub league_rank: Option<String>,
    pub sport_rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wc_rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wc_gb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wc_elim_num: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DivisionStandings {
    pub div_name: String,
    pub teams: Vec<StandingsRow>,
}

/// Group standings records by division id.
///
/// `division` is `all` or matches a division id, name or abbreviation
/// (case-insensitive).
pub fn standings_data(
    records: &[StandingsRecord],
    division: &str,
    include_wildcard: bool,
) -> BTreeMap<u32, DivisionStandings> {
    let wanted = division.trim().to_lowercase();
    let mut divisions: BTreeMap<u32, DivisionStandings> = BTreeMap::new();

    for record in records {
        for team_record in &record.team_records {
            let (div_id, div_name, div_abbr) = match &team_record.team.division {
                Some(d) => (d.id, d.name.clone(), d.abbreviation.clone().unwrap_or_default()),
                None => {
                    let id = record.division.as_ref().map(|d| d.id).unwrap_or_default();
                    (id, format!("Division {}", id), String::new())
                }
            };

            if wanted != "all"
                && wanted != div_id.to_string()
                && wanted != div_name.to_lowercase()
                && wanted != div_abbr.to_lowercase()
            {
                continue;
            }

            let row = StandingsRow {
                name: team_record.team.name.clone(),
                team_id: team_record.team.id,
                div_rank: team_record.division_rank.clone().unwrap_or_default(),
                w: team_record.wins,
                l: team_record.losses,
                gb: team_record.games_back.clone().unwrap_or_else(|| "-".to_string()),
                elim_num: team_record
                    .elimination_number
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
                league_rank: team_record.league_rank.clone(),
                sport_rank: team_record.sport_rank.clone(),
                wc_rank: include_wildcard
                    .then(|| team_record.wild_card_rank.clone().unwrap_or_else(|| "-".to_string())),
                wc_gb: include_wildcard.then(|| {
                    team_record
                        .wild_card_games_back
                        .clone()
                        .unwrap_or_else(|| "-".to_string())
                }),
                wc_elim_num: include_wildcard.then(|| {
                    team_record
                        .wild_card_elimination_number
                        .clone()
                        .unwrap_or_else(|| "-".to_string())
                }),
            };

            divisions
                .entry(div_id)
                .or_insert_with(|| DivisionStandings {
                    div_name,
                    teams: Vec::new(),
                })
                .teams
                .push(row);
        }
    }

    divisions
}

/// One ranked leader line
#[derive(Debug, Clone, Serialize)]
pub struct LeaderRow {
    pub rank: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderData {
    pub category: String,
    pub season: Option<String>,
    pub leaders: Vec<LeaderRow>,
}

pub fn leader_data(categories: &[LeaderCategory]) -> Vec<LeaderData> {
    categories
        .iter()
        .map(|category| LeaderData {
            category: category.leader_category.clone(),
            season: category.season.clone(),
            leaders: category
                .leaders
                .iter()
                .map(|l| LeaderRow {
                    rank: l.rank,
                    name: l.person.full_name.clone(),
                    team: l.team.as_ref().map(|t| t.name.clone()),
                    value: l.value.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Scoring plays of a game, in order, as typed plays and raw payloads
pub fn scoring_plays<'a>(feed: &'a LiveFeed, raw: &Value) -> Vec<(&'a Play, Value)> {
    let raw_plays = raw
        .pointer("/liveData/plays/allPlays")
        .and_then(Value::as_array);

    feed.live_data
        .plays
        .scoring_plays
        .iter()
        .filter_map(|&idx| {
            let play = feed.live_data.plays.all_plays.get(idx)?;
            let raw_play = raw_plays
                .and_then(|plays| plays.get(idx))
                .cloned()
                .unwrap_or(Value::Null);
            Some((play, raw_play))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statsapi::responses::{
        LeagueLeadersResponse, PersonResponse, PlayersResponse, ScheduleResponse, SeasonsResponse,
        StandingsResponse, TeamsResponse,
    };

    fn schedule_fixture() -> ScheduleResponse {
        serde_json::from_value(json!({
            "dates": [{
                "date": "2019-04-24",
                "games": [{
                    "gamePk": 565997,
                    "gameDate": "2019-04-24T23:10:00Z",
                    "officialDate": "2019-04-24",
                    "gameType": "R",
                    "status": {"detailedState": "Final", "abstractGameState": "Final", "abstractGameCode": "F"},
                    "teams": {
                        "away": {"team": {"id": 143, "name": "Philadelphia Phillies"}, "score": 6, "isWinner": true,
                                 "probablePitcher": {"id": 1, "fullName": "Vince Velasquez"}},
                        "home": {"team": {"id": 121, "name": "New York Mets"}, "score": 0, "isWinner": false}
                    },
                    "venue": {"id": 3289, "name": "Citi Field"},
                    "decisions": {
                        "winner": {"id": 1, "fullName": "Vince Velasquez"},
                        "loser": {"id": 2, "fullName": "Jason Vargas"}
                    },
                    "broadcasts": [{"name": "ESPN", "isNational": true}, {"name": "SNY", "isNational": false}]
                }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_game_summary() {
        let schedule = schedule_fixture();
        let game = schedule.games().next().unwrap();
        let summary = GameSummary::from_game(game);

        assert_eq!(summary.game_id, 565997);
        assert_eq!(summary.away_name, "Philadelphia Phillies");
        assert_eq!(summary.winning_team.as_deref(), Some("Philadelphia Phillies"));
        assert_eq!(summary.losing_pitcher.as_deref(), Some("Jason Vargas"));
        assert_eq!(summary.national_broadcasts, vec!["ESPN".to_string()]);
        assert_eq!(
            summary.summary,
            "2019-04-24 - Philadelphia Phillies (6) @ New York Mets (0) (Final)"
        );
    }

    #[test]
    fn test_last_and_next_game() {
        let response: TeamsResponse = serde_json::from_value(json!({
            "teams": [{
                "id": 143,
                "name": "Philadelphia Phillies",
                "previousGameSchedule": {"dates": [
                    {"date": "2024-09-28", "games": [{"gamePk": 1, "gameDate": "2024-09-28T20:05:00Z", "status": {"abstractGameCode": "F"}}]},
                    {"date": "2024-09-29", "games": [
                        {"gamePk": 2, "gameDate": "2024-09-29T19:05:00Z", "status": {"abstractGameCode": "F"}},
                        {"gamePk": 3, "gameDate": "2024-09-29T23:05:00Z", "status": {"abstractGameCode": "P"}}
                    ]}
                ]},
                "nextGameSchedule": {"dates": [
                    {"date": "2024-10-05", "games": [{"gamePk": 10, "gameDate": "2024-10-05T20:38:00Z", "status": {"abstractGameCode": "P"}}]},
                    {"date": "2024-10-06", "games": [{"gamePk": 11, "gameDate": "2024-10-06T17:08:00Z", "status": {"abstractGameCode": "P"}}]}
                ]}
            }]
        }))
        .unwrap();
        let team = &response.teams[0];

        assert_eq!(last_game(team), Some(2));
        assert_eq!(next_game(team), Some(10));
    }

    #[test]
    fn test_latest_season() {
        let response: SeasonsResponse = serde_json::from_value(json!({
            "seasons": [
                {"seasonId": "2023", "seasonStartDate": "2023-02-24", "seasonEndDate": "2023-11-01"},
                {"seasonId": "2024", "seasonStartDate": "2024-02-22", "seasonEndDate": "2024-10-30", "regularSeasonEndDate": "2024-09-30"}
            ]
        }))
        .unwrap();

        let season = latest_season(&response.seasons, "2024-06-01").unwrap();
        assert_eq!(season.season_id, "2024");
        assert!(season.extra.contains_key("regularSeasonEndDate"));

        let season = latest_season(&response.seasons, "2023-05-01").unwrap();
        assert_eq!(season.season_id, "2023");

        let season = latest_season(&response.seasons, "2025-12-01").unwrap();
        assert_eq!(season.season_id, "2024");

        assert!(latest_season(&[], "2024-01-01").is_none());
    }

    #[test]
    fn test_lookup_player_matches_all_parts() {
        let response: PlayersResponse = serde_json::from_value(json!({
            "people": [
                {"id": 545361, "fullName": "Mike Trout", "firstName": "Michael", "lastName": "Trout", "useName": "Mike"},
                {"id": 660271, "fullName": "Shohei Ohtani", "firstName": "Shohei", "lastName": "Ohtani"},
                {"id": 1, "fullName": "Mike Yastrzemski", "firstName": "Michael", "lastName": "Yastrzemski"}
            ]
        }))
        .unwrap();

        let found = lookup_player(&response.people, "mike trout");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 545361);

        assert_eq!(lookup_player(&response.people, "Mike").len(), 2);
        assert!(lookup_player(&response.people, "  ").is_empty());
        assert!(lookup_player(&response.people, "Nobody").is_empty());
    }

    #[test]
    fn test_lookup_team() {
        let response: TeamsResponse = serde_json::from_value(json!({
            "teams": [
                {"id": 112, "name": "Chicago Cubs", "teamCode": "chn", "fileCode": "chc", "abbreviation": "CHC", "teamName": "Cubs", "locationName": "Chicago"},
                {"id": 145, "name": "Chicago White Sox", "teamCode": "cha", "fileCode": "cws", "abbreviation": "CWS", "teamName": "White Sox", "locationName": "Chicago"},
                {"id": 121, "name": "New York Mets", "teamCode": "nyn", "fileCode": "nym", "abbreviation": "NYM", "teamName": "Mets", "locationName": "New York"}
            ]
        }))
        .unwrap();

        let cubs = lookup_team(&response.teams, "chn");
        assert_eq!(cubs.len(), 1);
        assert_eq!(cubs[0]["id"], 112);

        assert_eq!(lookup_team(&response.teams, "chicago").len(), 2);
        assert!(lookup_team(&response.teams, "").is_empty());
    }

    #[test]
    fn test_player_stat_data_flattens_splits() {
        let response: PersonResponse = serde_json::from_value(json!({
            "people": [{
                "id": 425877,
                "fullName": "Yadier Molina",
                "firstName": "Yadier",
                "lastName": "Molina",
                "nickName": "Yadi",
                "currentTeam": {"id": 138, "name": "St. Louis Cardinals"},
                "primaryPosition": {"abbreviation": "C"},
                "batSide": {"code": "R", "description": "Right"},
                "stats": [
                    {"type": {"displayName": "career"}, "group": {"displayName": "hitting"},
                     "splits": [{"stat": {"gamesPlayed": 1982, "avg": ".280"}}]},
                    {"type": {"displayName": "season"}, "group": {"displayName": "hitting"},
                     "splits": [{"season": "2019", "stat": {"gamesPlayed": 113}}]}
                ]
            }]
        }))
        .unwrap();

        let data = player_stat_data(&response.people[0]);
        assert_eq!(data.position.as_deref(), Some("C"));
        assert_eq!(data.bat_side.as_deref(), Some("Right"));
        assert_eq!(data.stats.len(), 2);
        assert_eq!(data.stats[0].stat_type, "career");
        assert!(data.stats[0].season.is_none());
        assert_eq!(data.stats[1].season.as_deref(), Some("2019"));
        assert_eq!(data.stats[1].stats["gamesPlayed"], 113);
    }

    #[test]
    fn test_standings_grouped_by_division() {
        let response: StandingsResponse = serde_json::from_value(json!({
            "records": [{
                "division": {"id": 204},
                "teamRecords": [
                    {"team": {"id": 144, "name": "Atlanta Braves", "division": {"id": 204, "name": "National League East", "abbreviation": "NLE"}},
                     "divisionRank": "1", "wins": 97, "losses": 65, "gamesBack": "-", "wildCardRank": "1", "wildCardGamesBack": "-"},
                    {"team": {"id": 120, "name": "Washington Nationals", "division": {"id": 204, "name": "National League East", "abbreviation": "NLE"}},
                     "divisionRank": "2", "wins": 93, "losses": 69, "gamesBack": "4.0", "eliminationNumber": "E"}
                ]
            }, {
                "division": {"id": 201},
                "teamRecords": [
                    {"team": {"id": 147, "name": "New York Yankees", "division": {"id": 201, "name": "American League East", "abbreviation": "ALE"}},
                     "divisionRank": "1", "wins": 103, "losses": 59, "gamesBack": "-"}
                ]
            }]
        }))
        .unwrap();

        let all = standings_data(&response.records, "all", true);
        assert_eq!(all.len(), 2);
        let nle = &all[&204];
        assert_eq!(nle.div_name, "National League East");
        assert_eq!(nle.teams.len(), 2);
        assert_eq!(nle.teams[1].gb, "4.0");
        assert_eq!(nle.teams[1].elim_num, "E");
        assert_eq!(nle.teams[0].wc_rank.as_deref(), Some("1"));

        let ale = standings_data(&response.records, "ALE", false);
        assert_eq!(ale.len(), 1);
        assert!(ale[&201].teams[0].wc_rank.is_none());

        assert!(standings_data(&response.records, "999", true).is_empty());
    }

    #[test]
    fn test_leader_data() {
        let response: LeagueLeadersResponse = serde_json::from_value(json!({
            "leagueLeaders": [{
                "leaderCategory": "homeRuns",
                "season": "2019",
                "leaders": [
                    {"rank": 1, "value": "53", "person": {"id": 1, "fullName": "Pete Alonso"}, "team": {"id": 121, "name": "New York Mets"}}
                ]
            }]
        }))
        .unwrap();

        let data = leader_data(&response.league_leaders);
        assert_eq!(data[0].category, "homeRuns");
        assert_eq!(data[0].leaders[0].name, "Pete Alonso");
        assert_eq!(data[0].leaders[0].team.as_deref(), Some("New York Mets"));
    }

    #[test]
    fn test_scoring_plays_keeps_raw_payload() {
        let raw = json!({
            "gameData": {"teams": {"away": {"name": "Miami Marlins"}, "home": {"name": "Philadelphia Phillies"}}},
            "liveData": {"plays": {
                "allPlays": [
                    {"result": {"description": "Strikeout", "awayScore": 0, "homeScore": 0}, "about": {"halfInning": "top", "inning": 1}},
                    {"result": {"description": "Rhys Hoskins doubles", "awayScore": 0, "homeScore": 1}, "about": {"halfInning": "bottom", "inning": 1}}
                ],
                "scoringPlays": [1]
            }}
        });
        let feed: LiveFeed = serde_json::from_value(raw.clone()).unwrap();

        let plays = scoring_plays(&feed, &raw);
        assert_eq!(plays.len(), 1);
        assert_eq!(plays[0].0.result.home_score, 1);
        assert_eq!(plays[0].1["result"]["description"], "Rhys Hoskins doubles");
    }
}
