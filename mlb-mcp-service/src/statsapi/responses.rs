//! Response types for the MLB Stats API.
//!
//! Only the fields the service reads are modelled. Endpoints whose payload
//! is handed back to callers untouched are fetched as `serde_json::Value`
//! and projected onto these types with [`view`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::error::StatsApiError;

/// Project a raw payload onto a typed view
pub fn view<T: DeserializeOwned>(endpoint: &str, value: &Value) -> Result<T, StatsApiError> {
    T::deserialize(value).map_err(|source| StatsApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

// ==================== Shared ====================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    #[serde(default)]
    pub detailed_state: String,
    #[serde(default)]
    pub abstract_game_state: Option<String>,
    #[serde(default)]
    pub abstract_game_code: Option<String>,
}

impl GameStatus {
    pub fn is_final(&self) -> bool {
        self.abstract_game_code.as_deref() == Some("F")
            || self.abstract_game_state.as_deref() == Some("Final")
    }
}

// ==================== Schedule ====================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

impl ScheduleResponse {
    pub fn games(&self) -> impl Iterator<Item = &ScheduleGame> {
        self.dates.iter().flat_map(|d| d.games.iter())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDate {
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    pub game_pk: u64,
    /// ISO-8601 UTC timestamp
    #[serde(default)]
    pub game_date: String,
    #[serde(default)]
    pub official_date: Option<String>,
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub teams: GameTeams,
    #[serde(default)]
    pub venue: Option<NamedRef>,
    #[serde(default)]
    pub double_header: Option<String>,
    #[serde(default)]
    pub game_number: Option<u32>,
    #[serde(default)]
    pub series_status: Option<SeriesStatus>,
    #[serde(default)]
    pub linescore: Option<ScheduleLinescore>,
    #[serde(default)]
    pub decisions: Option<Decisions>,
    #[serde(default)]
    pub broadcasts: Vec<Broadcast>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameTeams {
    #[serde(default)]
    pub away: GameTeam,
    #[serde(default)]
    pub home: GameTeam,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTeam {
    #[serde(default)]
    pub team: NamedRef,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub is_winner: Option<bool>,
    #[serde(default)]
    pub probable_pitcher: Option<PersonRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStatus {
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLinescore {
    #[serde(default)]
    pub current_inning: Option<u32>,
    #[serde(default)]
    pub inning_state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Decisions {
    #[serde(default)]
    pub winner: Option<PersonRef>,
    #[serde(default)]
    pub loser: Option<PersonRef>,
    #[serde(default)]
    pub save: Option<PersonRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_national: bool,
}

// ==================== Teams ====================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team_code: Option<String>,
    #[serde(default)]
    pub file_code: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub previous_game_schedule: Option<ScheduleResponse>,
    #[serde(default)]
    pub next_game_schedule: Option<ScheduleResponse>,
}

// ==================== Seasons ====================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonsResponse {
    #[serde(default)]
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub season_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_end_date: Option<String>,
    /// Remaining date fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ==================== People ====================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayersResponse {
    #[serde(default)]
    pub people: Vec<Player>,
}

/// Entry of the sport-wide player list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxscore_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_team: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mlb_debut_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonResponse {
    #[serde(default)]
    pub people: Vec<PersonDetail>,
}

/// A single person hydrated with stats
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetail {
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub current_team: Option<NamedRef>,
    #[serde(default)]
    pub primary_position: Option<Position>,
    #[serde(default)]
    pub mlb_debut_date: Option<String>,
    #[serde(default)]
    pub last_played_date: Option<String>,
    #[serde(default)]
    pub bat_side: Option<CodeDescription>,
    #[serde(default)]
    pub pitch_hand: Option<CodeDescription>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeDescription {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    #[serde(rename = "type", default)]
    pub stat_type: DisplayName,
    #[serde(default)]
    pub group: DisplayName,
    #[serde(default)]
    pub splits: Vec<StatSplit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayName {
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSplit {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub stat: Map<String, Value>,
}

// ==================== Standings ====================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub records: Vec<StandingsRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRecord {
    #[serde(default)]
    pub division: Option<NamedRef>,
    #[serde(default)]
    pub team_records: Vec<TeamRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team: StandingsTeam,
    #[serde(default)]
    pub division_rank: Option<String>,
    #[serde(default)]
    pub league_rank: Option<String>,
    #[serde(default)]
    pub sport_rank: Option<String>,
    #[serde(default)]
    pub wild_card_rank: Option<String>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub games_back: Option<String>,
    #[serde(default)]
    pub wild_card_games_back: Option<String>,
    #[serde(default)]
    pub elimination_number: Option<String>,
    #[serde(default)]
    pub wild_card_elimination_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsTeam {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub division: Option<Division>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

// ==================== Leaders ====================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueLeadersResponse {
    #[serde(default)]
    pub league_leaders: Vec<LeaderCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLeadersResponse {
    #[serde(default)]
    pub team_leaders: Vec<LeaderCategory>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderCategory {
    #[serde(default)]
    pub leader_category: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub leaders: Vec<Leader>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Leader {
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub person: PersonRef,
    #[serde(default)]
    pub team: Option<NamedRef>,
}

// ==================== Game content ====================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameContent {
    #[serde(default)]
    pub highlights: Option<HighlightsSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighlightsSection {
    #[serde(default)]
    pub highlights: Option<HighlightList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighlightList {
    #[serde(default)]
    pub items: Vec<Highlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub playbacks: Vec<Playback>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playback {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Highlight {
    /// Preferred video URL: the mp4Avc rendition, else the first playback
    pub fn video_url(&self) -> Option<&str> {
        self.playbacks
            .iter()
            .find(|p| p.name == "mp4Avc")
            .or_else(|| self.playbacks.first())
            .map(|p| p.url.as_str())
    }
}

// ==================== Live feed ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveFeed {
    pub game_data: FeedGameData,
    pub live_data: LiveData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedGameData {
    pub teams: FeedTeams,
    #[serde(default)]
    pub status: GameStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedTeams {
    pub away: FeedTeam,
    pub home: FeedTeam,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedTeam {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl FeedTeam {
    /// Short display name ("Phillies"), falling back to the full name
    pub fn short_name(&self) -> &str {
        self.team_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveData {
    #[serde(default)]
    pub linescore: Linescore,
    #[serde(default)]
    pub plays: Plays,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Linescore {
    #[serde(default)]
    pub inning_state: Option<String>,
    #[serde(default)]
    pub innings: Vec<Inning>,
    #[serde(default)]
    pub teams: LinescoreTeams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Inning {
    #[serde(default)]
    pub away: LineTotals,
    #[serde(default)]
    pub home: LineTotals,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinescoreTeams {
    #[serde(default)]
    pub away: LineTotals,
    #[serde(default)]
    pub home: LineTotals,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTotals {
    #[serde(default)]
    pub runs: Option<u32>,
    #[serde(default)]
    pub hits: Option<u32>,
    #[serde(default)]
    pub errors: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plays {
    #[serde(default)]
    pub all_plays: Vec<Play>,
    /// Indexes into `all_plays`
    #[serde(default)]
    pub scoring_plays: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Play {
    #[serde(default)]
    pub result: PlayResult,
    #[serde(default)]
    pub about: PlayAbout,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResult {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub away_score: u32,
    #[serde(default)]
    pub home_score: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayAbout {
    #[serde(default)]
    pub half_inning: String,
    #[serde(default)]
    pub inning: u32,
}

// ==================== Boxscore ====================

#[derive(Debug, Clone, Deserialize)]
pub struct Boxscore {
    pub teams: BoxscoreTeams,
    /// Game-level notes (umpires, weather, attendance, ...)
    #[serde(default)]
    pub info: Vec<LabelValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoxscoreTeams {
    pub away: BoxscoreTeam,
    pub home: BoxscoreTeam,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreTeam {
    pub team: NamedRef,
    #[serde(default)]
    pub team_stats: TeamStats,
    #[serde(default)]
    pub players: HashMap<String, BoxscorePlayer>,
    #[serde(default)]
    pub batters: Vec<u64>,
    #[serde(default)]
    pub pitchers: Vec<u64>,
    /// BATTING and FIELDING note sections
    #[serde(default)]
    pub info: Vec<InfoSection>,
    /// Substitution notes (a-Popped out for ...)
    #[serde(default)]
    pub note: Vec<LabelValue>,
}

impl BoxscoreTeam {
    pub fn player(&self, id: u64) -> Option<&BoxscorePlayer> {
        self.players.get(&format!("ID{}", id))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamStats {
    #[serde(default)]
    pub batting: BattingLine,
    #[serde(default)]
    pub pitching: PitchingLine,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscorePlayer {
    #[serde(default)]
    pub person: PersonRef,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub batting_order: Option<String>,
    #[serde(default)]
    pub stats: PlayerStats,
    #[serde(default)]
    pub season_stats: PlayerSeasonStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerStats {
    #[serde(default)]
    pub batting: BattingLine,
    #[serde(default)]
    pub pitching: PitchingLine,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingLine {
    #[serde(default)]
    pub at_bats: Option<u32>,
    #[serde(default)]
    pub runs: Option<u32>,
    #[serde(default)]
    pub hits: Option<u32>,
    #[serde(default)]
    pub rbi: Option<u32>,
    #[serde(default)]
    pub base_on_balls: Option<u32>,
    #[serde(default)]
    pub strike_outs: Option<u32>,
    #[serde(default)]
    pub left_on_base: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingLine {
    #[serde(default)]
    pub innings_pitched: Option<String>,
    #[serde(default)]
    pub hits: Option<u32>,
    #[serde(default)]
    pub runs: Option<u32>,
    #[serde(default)]
    pub earned_runs: Option<u32>,
    #[serde(default)]
    pub base_on_balls: Option<u32>,
    #[serde(default)]
    pub strike_outs: Option<u32>,
    #[serde(default)]
    pub home_runs: Option<u32>,
    /// Decision note such as "(W, 1-0)"
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerSeasonStats {
    #[serde(default)]
    pub batting: SeasonBatting,
    #[serde(default)]
    pub pitching: SeasonPitching,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonBatting {
    #[serde(default)]
    pub avg: Option<String>,
    #[serde(default)]
    pub ops: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonPitching {
    #[serde(default)]
    pub era: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub field_list: Vec<LabelValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelValue {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: Option<String>,
}
