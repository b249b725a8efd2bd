//! MLB Stats API client implementation.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::error::StatsApiError;
use super::options::{
    LeadersQuery, PersonStatsQuery, RosterQuery, ScheduleQuery, StandingsQuery, TeamLeadersQuery,
    TeamsQuery,
};
use super::responses::{
    GameContent, PersonResponse, PlayersResponse, ScheduleResponse, SeasonsResponse,
    StandingsResponse, Team, TeamLeadersResponse, TeamsResponse,
};
use crate::config::StatsApiConfig;

/// Hydrations requested for every schedule lookup
const SCHEDULE_HYDRATE: &str = "decisions,probablePitcher(note),linescore,broadcasts";

/// MLB Stats API client
#[derive(Clone)]
pub struct StatsApiClient {
    client: Client,
    base_url: String,
}

impl StatsApiClient {
    /// Create a new Stats API client
    pub fn new(config: &StatsApiConfig) -> Result<Self, StatsApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Games matching the query
    pub async fn schedule(&self, query: &ScheduleQuery) -> Result<ScheduleResponse, StatsApiError> {
        let mut hydrate = SCHEDULE_HYDRATE.to_string();
        if query.include_series_status {
            hydrate.push_str(",seriesStatus");
        }
        let mut url = format!(
            "{}/v1/schedule?sportId={}&hydrate={}",
            self.base_url,
            query.sport_id,
            urlencoding::encode(&hydrate)
        );
        push_param(&mut url, "date", query.date.as_deref());
        push_param(&mut url, "startDate", query.start_date.as_deref());
        push_param(&mut url, "endDate", query.end_date.as_deref());
        push_param(&mut url, "teamId", query.team_id);
        push_param(&mut url, "opponentId", query.opponent_id);
        push_param(&mut url, "gamePk", query.game_pk);
        push_param(&mut url, "season", query.season.as_deref());

        self.get_json("schedule", &url).await
    }

    /// A team hydrated with its previous or next game schedule
    pub async fn team_schedule(&self, team_id: u32, next: bool) -> Result<Team, StatsApiError> {
        let hydrate = if next {
            "nextSchedule"
        } else {
            "previousSchedule"
        };
        let url = format!(
            "{}/v1/teams/{}?hydrate={}",
            self.base_url, team_id, hydrate
        );

        let response: TeamsResponse = self.get_json("team", &url).await?;
        response
            .teams
            .into_iter()
            .next()
            .ok_or_else(|| StatsApiError::NotFound {
                message: format!("team {}", team_id),
            })
    }

    /// Every season on record for a sport
    pub async fn seasons(&self, sport_id: u32) -> Result<SeasonsResponse, StatsApiError> {
        let url = format!("{}/v1/seasons?all=true&sportId={}", self.base_url, sport_id);
        self.get_json("seasons", &url).await
    }

    /// League-wide game pace figures for a season
    pub async fn game_pace(&self, season: i32, sport_id: u32) -> Result<Value, StatsApiError> {
        let url = format!(
            "{}/v1/gamePace?season={}&sportId={}",
            self.base_url, season, sport_id
        );
        self.get_json("gamePace", &url).await
    }

    /// League stat leaders
    pub async fn league_leaders(&self, query: &LeadersQuery) -> Result<Value, StatsApiError> {
        let mut url = format!(
            "{}/v1/stats/leaders?leaderCategories={}&limit={}&sportId={}",
            self.base_url,
            urlencoding::encode(&query.leader_categories),
            query.limit,
            query.sport_id
        );
        push_param(&mut url, "season", query.season.as_deref());
        push_param(&mut url, "statGroup", query.stat_group.as_deref());
        push_param(&mut url, "leagueId", query.league_id);
        push_param(&mut url, "playerPool", query.player_pool.as_deref());
        push_param(&mut url, "statType", query.stat_type.as_deref());
        push_param(&mut url, "gameTypes", query.game_types.as_deref());

        self.get_json("stats_leaders", &url).await
    }

    /// Full live feed for a game, optionally as of a past timecode
    pub async fn live_feed(&self, game_pk: u64, timecode: Option<&str>) -> Result<Value, StatsApiError> {
        let mut url = format!("{}/v1.1/game/{}/feed/live", self.base_url, game_pk);
        if let Some(tc) = timecode {
            url.push_str(&format!("?timecode={}", urlencoding::encode(tc)));
        }
        self.get_json("game", &url).await
    }

    /// Boxscore for a game
    pub async fn boxscore(&self, game_pk: u64, timecode: Option<&str>) -> Result<Value, StatsApiError> {
        let mut url = format!("{}/v1/game/{}/boxscore", self.base_url, game_pk);
        if let Some(tc) = timecode {
            url.push_str(&format!("?timecode={}", urlencoding::encode(tc)));
        }
        self.get_json("game_boxscore", &url).await
    }

    /// Editorial content (highlights) for a game
    pub async fn game_content(&self, game_pk: u64) -> Result<GameContent, StatsApiError> {
        let url = format!("{}/v1/game/{}/content", self.base_url, game_pk);
        self.get_json("game_content", &url).await
    }

    /// All players registered with a sport, for a season
    pub async fn sports_players(
        &self,
        sport_id: u32,
        season: Option<&str>,
    ) -> Result<PlayersResponse, StatsApiError> {
        let mut url = format!("{}/v1/sports/{}/players", self.base_url, sport_id);
        if let Some(s) = season {
            url.push_str(&format!("?season={}", urlencoding::encode(s)));
        }
        self.get_json("sports_players", &url).await
    }

    /// Team list filtered by activity and season
    pub async fn teams(&self, query: &TeamsQuery) -> Result<TeamsResponse, StatsApiError> {
        let mut url = format!(
            "{}/v1/teams?activeStatus={}&sportIds={}",
            self.base_url,
            urlencoding::encode(&query.active_status),
            query.sport_ids
        );
        push_param(&mut url, "season", query.season.as_deref());

        self.get_json("teams", &url).await
    }

    /// A person hydrated with stats. Returns the raw payload and the parsed view.
    pub async fn person(
        &self,
        person_id: u64,
        query: &PersonStatsQuery,
    ) -> Result<(Value, PersonResponse), StatsApiError> {
        let url = format!(
            "{}/v1/people/{}?hydrate={}",
            self.base_url,
            person_id,
            urlencoding::encode(&query.hydrate())
        );

        let raw: Value = self.get_json("person", &url).await?;
        let parsed = super::responses::view("person", &raw)?;
        Ok((raw, parsed))
    }

    /// Roster for a team
    pub async fn team_roster(&self, team_id: u32, query: &RosterQuery) -> Result<Value, StatsApiError> {
        let mut url = format!(
            "{}/v1/teams/{}/roster?rosterType={}",
            self.base_url,
            team_id,
            urlencoding::encode(query.roster_type.as_deref().unwrap_or("active"))
        );
        push_param(&mut url, "season", query.season);
        push_param(&mut url, "date", query.date.as_deref());

        self.get_json("team_roster", &url).await
    }

    /// Standings for one or more leagues
    pub async fn standings(&self, query: &StandingsQuery) -> Result<StandingsResponse, StatsApiError> {
        let mut url = format!(
            "{}/v1/standings?leagueId={}&hydrate={}",
            self.base_url,
            urlencoding::encode(&query.league_ids),
            urlencoding::encode("team(division)")
        );
        push_param(&mut url, "season", query.season.as_deref());
        push_param(&mut url, "standingsTypes", query.standings_types.as_deref());
        push_param(&mut url, "date", query.date.as_deref());

        self.get_json("standings", &url).await
    }

    /// Leaders of one category within a team
    pub async fn team_leaders(
        &self,
        team_id: u32,
        query: &TeamLeadersQuery,
    ) -> Result<TeamLeadersResponse, StatsApiError> {
        let url = format!(
            "{}/v1/teams/{}/leaders?leaderCategories={}&season={}&leaderGameTypes={}&limit={}&hydrate=person",
            self.base_url,
            team_id,
            urlencoding::encode(&query.leader_category),
            query.season,
            urlencoding::encode(&query.leader_game_types),
            query.limit
        );
        self.get_json("team_leaders", &url).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> Result<T, StatsApiError> {
        debug!(endpoint, url, "Stats API request");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                record_request(endpoint, "error");
                return Err(e.into());
            }
        };

        let status = response.status();
        record_request(endpoint, status.as_str());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StatsApiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body).map_err(|source| StatsApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })?;

        // Some missing objects come back as 200 with an error body
        if value.get("messageNumber").is_some() {
            return Err(StatsApiError::NotFound {
                message: error_message(&body),
            });
        }

        serde_json::from_value(value).map_err(|source| StatsApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn record_request(endpoint: &'static str, status: &str) {
    metrics::counter!(
        "mlb_stats_api_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Append `&key=value` when a value is present
fn push_param<V: ToString>(url: &mut String, key: &str, value: Option<V>) {
    if let Some(v) = value {
        url.push_str(&format!("&{}={}", key, urlencoding::encode(&v.to_string())));
    }
}

/// Pull the `message` field out of a Stats API error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}
