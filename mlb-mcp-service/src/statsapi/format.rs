//! Plain-text renderings of Stats API data.
//!
//! Layouts are for people reading tool output. They are not a stable
//! format and nothing parses them back.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::data::{DivisionStandings, LeaderData, PlayerStatData};
use super::options::BoxscoreSections;
use super::responses::{
    BattingLine, Boxscore, BoxscoreTeam, Highlight, LiveFeed, Play, PitchingLine,
};

fn num(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Inning-by-inning line score with R/H/E totals
pub fn linescore(feed: &LiveFeed) -> String {
    let teams = &feed.game_data.teams;
    let line = &feed.live_data.linescore;
    let status = &feed.game_data.status.detailed_state;

    let innings = line.innings.len().max(9);
    let width = [
        status.chars().count(),
        teams.away.short_name().chars().count(),
        teams.home.short_name().chars().count(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    let mut out = format!("{:<width$} ", status, width = width);
    for n in 1..=innings {
        let _ = write!(out, "{:>2} ", n);
    }
    out.push_str("  R   H   E\n");

    let sides = [(teams.away.short_name(), true), (teams.home.short_name(), false)];
    for (name, away) in sides {
        let _ = write!(out, "{:<width$} ", name, width = width);
        for n in 0..innings {
            let runs = line.innings.get(n).and_then(|inning| {
                if away {
                    inning.away.runs
                } else {
                    inning.home.runs
                }
            });
            let _ = write!(out, "{:>2} ", num(runs));
        }
        let totals = if away {
            &line.teams.away
        } else {
            &line.teams.home
        };
        let _ = writeln!(
            out,
            "{:>3} {:>3} {:>3}",
            num(totals.runs),
            num(totals.hits),
            num(totals.errors)
        );
    }

    out
}

/// Scoring plays, one block per play
pub fn scoring_plays(feed: &LiveFeed, plays: &[&Play]) -> String {
    let away = &feed.game_data.teams.away.name;
    let home = &feed.game_data.teams.home.name;

    plays
        .iter()
        .map(|play| {
            let half = if play.about.half_inning == "top" {
                "Top"
            } else {
                "Bottom"
            };
            format!(
                "{}\n{} {} - {}: {}, {}: {}",
                play.result.description.as_deref().unwrap_or_default(),
                half,
                play.about.inning,
                away,
                play.result.away_score,
                home,
                play.result.home_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Headline, duration, description and video link of each highlight
pub fn highlights(items: &[Highlight]) -> String {
    items
        .iter()
        .map(|h| {
            let mut block = match &h.duration {
                Some(d) => format!("{} ({})", h.headline, d),
                None => h.headline.clone(),
            };
            if let Some(desc) = h.description.as_deref().filter(|d| !d.is_empty()) {
                block.push('\n');
                block.push_str(desc);
            }
            if let Some(url) = h.video_url() {
                block.push('\n');
                block.push_str(url);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

const RULE: &str = "-------------------------------------------------------------------------------";

fn batting_row(out: &mut String, label: &str, line: &BattingLine, avg: &str, ops: &str) {
    let _ = writeln!(
        out,
        "{:<40} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}  {:>5} {:>5}",
        label,
        num(line.at_bats),
        num(line.runs),
        num(line.hits),
        num(line.rbi),
        num(line.base_on_balls),
        num(line.strike_outs),
        num(line.left_on_base),
        avg,
        ops
    );
}

fn pitching_row(out: &mut String, label: &str, line: &PitchingLine, era: &str) {
    let _ = writeln!(
        out,
        "{:<40} {:>5} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}  {:>6}",
        label,
        line.innings_pitched.as_deref().unwrap_or_default(),
        num(line.hits),
        num(line.runs),
        num(line.earned_runs),
        num(line.base_on_balls),
        num(line.strike_outs),
        num(line.home_runs),
        era
    );
}

fn batting_box(out: &mut String, team: &BoxscoreTeam) {
    out.push_str(RULE);
    out.push('\n');
    let _ = writeln!(
        out,
        "{:<40} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}  {:>5} {:>5}",
        format!("{} Batters", team.team.name),
        "AB",
        "R",
        "H",
        "RBI",
        "BB",
        "K",
        "LOB",
        "AVG",
        "OPS"
    );
    out.push_str(RULE);
    out.push('\n');

    for id in &team.batters {
        let Some(player) = team.player(*id) else {
            continue;
        };
        let order = player.batting_order.as_deref().unwrap_or_default();
        let position = player
            .position
            .as_ref()
            .and_then(|p| p.abbreviation.as_deref())
            .unwrap_or_default();
        let label = batter_label(order, &player.person.full_name, position);
        let season = &player.season_stats.batting;
        batting_row(
            out,
            &label,
            &player.stats.batting,
            season.avg.as_deref().unwrap_or_default(),
            season.ops.as_deref().unwrap_or_default(),
        );
    }

    out.push_str(RULE);
    out.push('\n');
    batting_row(out, "Totals", &team.team_stats.batting, "", "");
    out.push_str(RULE);
    out.push('\n');

    for note in &team.note {
        let _ = writeln!(out, "{}-{}", note.label, note.value.as_deref().unwrap_or_default());
    }
}

fn info_section(out: &mut String, team: &BoxscoreTeam, title: &str) {
    for section in team.info.iter().filter(|s| s.title == title) {
        let _ = writeln!(out, "{} {}", team.team.name, section.title);
        for field in &section.field_list {
            let _ = writeln!(
                out,
                "{}: {}",
                field.label,
                field.value.as_deref().unwrap_or_default()
            );
        }
        out.push('\n');
    }
}

fn pitching_box(out: &mut String, team: &BoxscoreTeam) {
    out.push_str(RULE);
    out.push('\n');
    let _ = writeln!(
        out,
        "{:<40} {:>5} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}  {:>6}",
        format!("{} Pitchers", team.team.name),
        "IP",
        "H",
        "R",
        "ER",
        "BB",
        "K",
        "HR",
        "ERA"
    );
    out.push_str(RULE);
    out.push('\n');

    for id in &team.pitchers {
        let Some(player) = team.player(*id) else {
            continue;
        };
        let label = match &player.stats.pitching.note {
            Some(note) => format!("{}  {}", player.person.full_name, note),
            None => player.person.full_name.clone(),
        };
        pitching_row(
            out,
            &label,
            &player.stats.pitching,
            player.season_stats.pitching.era.as_deref().unwrap_or_default(),
        );
    }

    out.push_str(RULE);
    out.push('\n');
    pitching_row(out, "Totals", &team.team_stats.pitching, "");
    out.push_str(RULE);
    out.push('\n');
}

/// Starters have a batting order ending in "00"; substitutes are indented.
fn batter_label(order: &str, name: &str, position: &str) -> String {
    match order.chars().next() {
        Some(slot) if order.ends_with("00") => format!("{} {}  {}", slot, name, position),
        _ => format!("    {}  {}", name, position),
    }
}

/// Box score with the requested sections, away team first
pub fn boxscore(boxscore: &Boxscore, sections: BoxscoreSections) -> String {
    let teams = [&boxscore.teams.away, &boxscore.teams.home];
    let mut out = String::new();

    if sections.batting_box {
        for team in teams {
            batting_box(&mut out, team);
            out.push('\n');
        }
    }
    if sections.batting_info {
        for team in teams {
            info_section(&mut out, team, "BATTING");
        }
    }
    if sections.fielding_info {
        for team in teams {
            info_section(&mut out, team, "FIELDING");
        }
    }
    if sections.pitching_box {
        for team in teams {
            pitching_box(&mut out, team);
            out.push('\n');
        }
    }
    if sections.game_info {
        for item in &boxscore.info {
            match item.value.as_deref() {
                Some(value) => {
                    let _ = writeln!(out, "{}: {}", item.label, value);
                }
                // Value-less entries carry the game date
                None => {
                    let _ = writeln!(out, "{}", item.label);
                }
            }
        }
    }

    out.trim_end().to_string()
}

/// Division tables
pub fn standings(divisions: &BTreeMap<u32, DivisionStandings>, include_wildcard: bool) -> String {
    let mut out = String::new();

    for division in divisions.values() {
        let _ = writeln!(out, "{}", division.div_name);
        let _ = write!(
            out,
            "{:<4} {:<28} {:>3} {:>3} {:>5} {:>4}",
            "Rank", "Team", "W", "L", "GB", "(E#)"
        );
        if include_wildcard {
            out.push_str(" WC Rank WC GB (E#)");
        }
        out.push('\n');

        for team in &division.teams {
            let _ = write!(
                out,
                "{:<4} {:<28} {:>3} {:>3} {:>5} {:>4}",
                team.div_rank, team.name, team.w, team.l, team.gb, team.elim_num
            );
            if include_wildcard {
                let _ = write!(
                    out,
                    " {:>7} {:>5} {:>4}",
                    team.wc_rank.as_deref().unwrap_or("-"),
                    team.wc_gb.as_deref().unwrap_or("-"),
                    team.wc_elim_num.as_deref().unwrap_or("-")
                );
            }
            out.push('\n');
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

/// Player header followed by one block per stat group
pub fn player_stats(data: &PlayerStatData) -> String {
    let mut header = String::new();
    if let Some(position) = &data.position {
        header.push_str(position);
        header.push(' ');
    }
    header.push_str(data.first_name.as_deref().unwrap_or(&data.full_name));
    if let Some(nick) = &data.nickname {
        let _ = write!(header, " \"{}\"", nick);
    }
    if let Some(last) = &data.last_name {
        header.push(' ');
        header.push_str(last);
    }
    if let Some(team) = &data.current_team {
        let _ = write!(header, " ({})", team);
    }

    let mut out = header;
    for block in &data.stats {
        out.push_str("\n\n");
        let title = match &block.season {
            Some(season) => format!("{} {} {}", season, capitalize(&block.stat_type), capitalize(&block.group)),
            None => format!("{} {}", capitalize(&block.stat_type), capitalize(&block.group)),
        };
        out.push_str(&title);
        for (key, value) in &block.stats {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let _ = write!(out, "\n{}: {}", key, rendered);
        }
    }

    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ranked leader tables, one per category
pub fn leaders(categories: &[LeaderData]) -> String {
    categories
        .iter()
        .map(|category| {
            let mut out = format!("{}\n", category.category);
            let _ = writeln!(out, "{:<5} {:<28} {:<24} {:>8}", "Rank", "Name", "Team", "Value");
            for leader in &category.leaders {
                let _ = writeln!(
                    out,
                    "{:<5} {:<28} {:<24} {:>8}",
                    leader.rank,
                    leader.name,
                    leader.team.as_deref().unwrap_or_default(),
                    leader.value
                );
            }
            out.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Ranked leaders of one team category
pub fn team_leaders(category: &LeaderData) -> String {
    let mut out = format!("{:<5} {:<28} {:>8}\n", "Rank", "Name", "Value");
    for leader in &category.leaders {
        let _ = writeln!(out, "{:<5} {:<28} {:>8}", leader.rank, leader.name, leader.value);
    }
    out.trim_end().to_string()
}
