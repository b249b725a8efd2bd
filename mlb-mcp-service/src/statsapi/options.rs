//! Query types for Stats API requests.

/// Filters for the schedule endpoint
#[derive(Debug, Clone)]
pub struct ScheduleQuery {
    /// Single date (MM/DD/YYYY or YYYY-MM-DD)
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub team_id: Option<u32>,
    pub opponent_id: Option<u32>,
    pub sport_id: u32,
    pub game_pk: Option<u64>,
    pub season: Option<String>,
    /// Hydrate series status for each game
    pub include_series_status: bool,
}

impl Default for ScheduleQuery {
    fn default() -> Self {
        Self {
            date: None,
            start_date: None,
            end_date: None,
            team_id: None,
            opponent_id: None,
            sport_id: 1,
            game_pk: None,
            season: None,
            include_series_status: true,
        }
    }
}

/// Filters for the league leaders endpoint
#[derive(Debug, Clone)]
pub struct LeadersQuery {
    pub leader_categories: String,
    pub season: Option<String>,
    pub limit: u32,
    pub stat_group: Option<String>,
    pub league_id: Option<u32>,
    /// all, qualified or rookies
    pub player_pool: Option<String>,
    pub sport_id: u32,
    pub stat_type: Option<String>,
    /// Comma-separated game type codes (R, W, S, ...)
    pub game_types: Option<String>,
}

impl LeadersQuery {
    pub fn new(leader_categories: impl Into<String>) -> Self {
        Self {
            leader_categories: leader_categories.into(),
            season: None,
            limit: 10,
            stat_group: None,
            league_id: None,
            player_pool: None,
            sport_id: 1,
            stat_type: None,
            game_types: None,
        }
    }
}

/// Filters for the team list endpoint
#[derive(Debug, Clone)]
pub struct TeamsQuery {
    /// Y, N or B
    pub active_status: String,
    pub season: Option<String>,
    pub sport_ids: u32,
}

impl Default for TeamsQuery {
    fn default() -> Self {
        Self {
            active_status: "Y".to_string(),
            season: None,
            sport_ids: 1,
        }
    }
}

/// Filters for a team roster
#[derive(Debug, Clone, Default)]
pub struct RosterQuery {
    /// active, 40Man, fullSeason, ...
    pub roster_type: Option<String>,
    pub season: Option<u32>,
    /// MM/DD/YYYY
    pub date: Option<String>,
}

/// Filters for the standings endpoint
#[derive(Debug, Clone)]
pub struct StandingsQuery {
    /// Comma-separated league ids
    pub league_ids: String,
    pub season: Option<String>,
    pub standings_types: Option<String>,
    /// MM/DD/YYYY
    pub date: Option<String>,
}

impl Default for StandingsQuery {
    fn default() -> Self {
        Self {
            league_ids: "103,104".to_string(),
            season: None,
            standings_types: None,
            date: None,
        }
    }
}

/// One leader category for a single team
#[derive(Debug, Clone)]
pub struct TeamLeadersQuery {
    pub leader_category: String,
    pub season: i32,
    pub leader_game_types: String,
    pub limit: u32,
}

/// Stat hydration for a person lookup
#[derive(Debug, Clone, Default)]
pub struct PersonStatsQuery {
    /// hitting, pitching, fielding
    pub groups: Vec<String>,
    /// season, career, yearByYear, ...
    pub types: Vec<String>,
    pub season: Option<String>,
}

impl PersonStatsQuery {
    /// Render as a `hydrate` value: `currentTeam,stats(group=[..],type=[..],season=..)`
    pub fn hydrate(&self) -> String {
        let groups = if self.groups.is_empty() {
            "hitting".to_string()
        } else {
            self.groups.join(",")
        };
        let types = if self.types.is_empty() {
            "season".to_string()
        } else {
            self.types.join(",")
        };
        let mut stats = format!("group=[{}],type=[{}]", groups, types);
        if let Some(season) = &self.season {
            stats.push_str(&format!(",season={}", season));
        }
        format!("currentTeam,stats({})", stats)
    }
}

/// Which sections of a boxscore to render
#[derive(Debug, Clone, Copy)]
pub struct BoxscoreSections {
    pub batting_box: bool,
    pub batting_info: bool,
    pub fielding_info: bool,
    pub pitching_box: bool,
    pub game_info: bool,
}

impl Default for BoxscoreSections {
    fn default() -> Self {
        Self {
            batting_box: true,
            batting_info: true,
            fielding_info: true,
            pitching_box: true,
            game_info: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_hydrate_defaults() {
        let query = PersonStatsQuery::default();
        assert_eq!(
            query.hydrate(),
            "currentTeam,stats(group=[hitting],type=[season])"
        );
    }

    #[test]
    fn test_person_hydrate_with_season() {
        let query = PersonStatsQuery {
            groups: vec!["hitting".to_string(), "pitching".to_string()],
            types: vec!["season".to_string(), "career".to_string()],
            season: Some("2019".to_string()),
        };
        assert_eq!(
            query.hydrate(),
            "currentTeam,stats(group=[hitting,pitching],type=[season,career],season=2019)"
        );
    }
}
