//! Game tool implementations.

use serde_json::{Value, json};
use tracing::debug;

use super::args::{self, BoxscoreArgs, GameIdArgs, GamePaceArgs, LinescoreArgs, ScheduleArgs};
use super::{ToolOutput, current_year};
use crate::error::ToolResult;
use crate::service::MlbService;
use crate::statsapi::data::{self, GameSummary};
use crate::statsapi::responses::{self, Boxscore, LiveFeed, Play};
use crate::statsapi::{BoxscoreSections, ScheduleQuery, format};

pub(super) async fn execute_boxscore(service: &MlbService, arguments: Value) -> ToolResult<ToolOutput> {
    let args: BoxscoreArgs = args::parse("boxscore", arguments)?;
    let sections = BoxscoreSections {
        batting_box: args.batting_box,
        batting_info: args.batting_info,
        fielding_info: args.fielding_info,
        pitching_box: args.pitching_box,
        game_info: args.game_info,
    };
    debug!(game_pk = args.game_pk, ?sections, "Fetching boxscore");

    let raw = service
        .stats()
        .boxscore(args.game_pk, args.time_code.as_deref())
        .await?;
    let parsed: Boxscore = responses::view("game_boxscore", &raw)?;

    Ok(ToolOutput::Json(json!({
        "query": {
            "gamePk": args.game_pk,
            "battingBox": args.batting_box,
            "battingInfo": args.batting_info,
            "fieldingInfo": args.fielding_info,
            "pitchingBox": args.pitching_box,
            "gameInfo": args.game_info,
            "timecode": args.time_code,
        },
        "game": format::boxscore(&parsed, sections),
        "json": raw,
    })))
}

pub(super) async fn execute_game_highlight_data(
    service: &MlbService,
    arguments: Value,
) -> ToolResult<ToolOutput> {
    let args: GameIdArgs = args::parse("game_highlight_data", arguments)?;

    let content = service.stats().game_content(args.game_id).await?;
    let items = content
        .highlights
        .and_then(|h| h.highlights)
        .map(|list| list.items)
        .unwrap_or_default();
    debug!(game_pk = args.game_id, count = items.len(), "Fetched highlights");

    Ok(ToolOutput::Json(json!({
        "query": { "gamePk": args.game_id },
        "game highlights": format::highlights(&items),
        "json": items,
    })))
}

pub(super) async fn execute_game_pace_data(
    service: &MlbService,
    arguments: Value,
) -> ToolResult<ToolOutput> {
    let args: GamePaceArgs = args::parse("game_pace_data", arguments)?;
    let season = args.season.unwrap_or_else(current_year);

    let pace = service.stats().game_pace(season, args.sport_id).await?;

    Ok(ToolOutput::Json(json!({
        "query": { "season": season, "sportId": args.sport_id },
        "game_pace_data": pace,
    })))
}

pub(super) async fn execute_scoring_play_data(
    service: &MlbService,
    arguments: Value,
) -> ToolResult<ToolOutput> {
    let args: GameIdArgs = args::parse("scoring_play_data", arguments)?;

    let raw = service.stats().live_feed(args.game_id, None).await?;
    let feed: LiveFeed = responses::view("game", &raw)?;
    let plays = data::scoring_plays(&feed, &raw);

    let typed: Vec<&Play> = plays.iter().map(|(play, _)| *play).collect();
    let text = format::scoring_plays(&feed, &typed);
    let raw_plays: Vec<Value> = plays.into_iter().map(|(_, raw)| raw).collect();

    Ok(ToolOutput::Json(json!({
        "query": { "gamePk": args.game_id },
        "scoring plays": text,
        "json": raw_plays,
    })))
}

pub(super) async fn execute_linescore(service: &MlbService, arguments: Value) -> ToolResult<ToolOutput> {
    let args: LinescoreArgs = args::parse("linescore", arguments)?;

    let raw = service
        .stats()
        .live_feed(args.game_id, args.timecode.as_deref())
        .await?;
    let feed: LiveFeed = responses::view("game", &raw)?;
    let linescore = raw
        .pointer("/liveData/linescore")
        .cloned()
        .unwrap_or_else(|| json!({}));

    Ok(ToolOutput::Json(json!({
        "query": { "gamePk": args.game_id, "timecode": args.timecode },
        "formatted": format::linescore(&feed),
        "json": linescore,
    })))
}

pub(super) async fn execute_game_schedule(
    service: &MlbService,
    arguments: Value,
) -> ToolResult<ToolOutput> {
    let args: ScheduleArgs = args::parse("game_schedule", arguments)?;
    for (name, value) in [
        ("date", &args.date),
        ("start_date", &args.start_date),
        ("end_date", &args.end_date),
    ] {
        if let Some(value) = value {
            args::validate_schedule_date(name, value)?;
        }
    }

    let query = ScheduleQuery {
        date: args.date,
        start_date: args.start_date,
        end_date: args.end_date,
        team_id: args.team_id,
        opponent_id: args.opponent_id,
        sport_id: args.sport_id,
        game_pk: args.game_id,
        season: args.season,
        include_series_status: args.include_series_status,
    };

    let schedule = service.stats().schedule(&query).await?;
    let games: Vec<GameSummary> = schedule.games().map(GameSummary::from_game).collect();
    debug!(count = games.len(), "Retrieved schedule");

    Ok(ToolOutput::Json(json!({
        "query": {
            "date": query.date,
            "start_date": query.start_date,
            "end_date": query.end_date,
            "team_id": query.team_id,
            "opponent_id": query.opponent_id,
            "sport_id": query.sport_id,
            "game_id": query.game_pk,
            "season": query.season,
            "include_series_status": query.include_series_status,
        },
        "count": games.len(),
        "games": games,
    })))
}

#[cfg(test)]
mod tests {
    use crate::error::ToolError;
    use crate::tools::test_support::service_for;
    use crate::tools::{ToolOutput, execute};
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn json_output(output: ToolOutput) -> Value {
        match output {
            ToolOutput::Json(value) => value,
            ToolOutput::Text(text) => panic!("Expected JSON output, got text: {text}"),
        }
    }

    fn feed() -> Value {
        json!({
            "gameData": {
                "teams": {
                    "away": {"id": 146, "name": "Miami Marlins", "teamName": "Marlins"},
                    "home": {"id": 143, "name": "Philadelphia Phillies", "teamName": "Phillies"}
                },
                "status": {"detailedState": "Final", "abstractGameCode": "F"}
            },
            "liveData": {
                "linescore": {
                    "innings": [
                        {"num": 1, "away": {"runs": 0}, "home": {"runs": 1}},
                        {"num": 8, "away": {"runs": 1}, "home": {"runs": 4}}
                    ],
                    "teams": {
                        "away": {"runs": 1, "hits": 6, "errors": 0},
                        "home": {"runs": 5, "hits": 9, "errors": 1}
                    }
                },
                "plays": {
                    "allPlays": [
                        {"result": {"description": "Rhys Hoskins doubles.", "awayScore": 0, "homeScore": 1},
                         "about": {"halfInning": "bottom", "inning": 1}},
                        {"result": {"description": "Jean Segura grounds out.", "awayScore": 0, "homeScore": 1},
                         "about": {"halfInning": "top", "inning": 2}},
                        {"result": {"description": "Rhys Hoskins walks.", "awayScore": 1, "homeScore": 5},
                         "about": {"halfInning": "bottom", "inning": 8}}
                    ],
                    "scoringPlays": [0, 2]
                }
            }
        })
    }

    #[tokio::test]
    async fn test_boxscore_unknown_game_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/game/999999999/boxscore"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Object not found"})),
            )
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = execute(&service, "boxscore", json!({"gamePk": 999999999}))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ToolError::Upstream {
                message: "API error (status 404): Object not found".to_string(),
                status: Some(404)
            }
        );
    }

    #[tokio::test]
    async fn test_boxscore_formatted_and_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/game/565997/boxscore"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "teams": {
                    "away": {"team": {"id": 146, "name": "Miami Marlins"}},
                    "home": {"team": {"id": 143, "name": "Philadelphia Phillies"}}
                },
                "info": [{"label": "Att", "value": "27,685."}]
            })))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let output = json_output(
            execute(
                &service,
                "boxscore",
                json!({"gamePk": "565997", "battingBox": false, "pichitingBox": false}),
            )
            .await
            .unwrap(),
        );

        assert_eq!(output["query"]["gamePk"], 565997);
        assert_eq!(output["query"]["pitchingBox"], false);
        assert!(output["game"].as_str().unwrap().contains("Att: 27,685."));
        assert_eq!(output["json"]["teams"]["home"]["team"]["name"], "Philadelphia Phillies");
    }

    #[tokio::test]
    async fn test_linescore_text_matches_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.1/game/565997/feed/live"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed()))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let output = json_output(
            execute(&service, "linescore", json!({"gameID": 565997}))
                .await
                .unwrap(),
        );

        let formatted = output["formatted"].as_str().unwrap();
        assert!(formatted.contains("Marlins"));
        assert!(formatted.contains("Phillies"));
        assert_eq!(output["json"]["teams"]["home"]["runs"], 5);
        assert_eq!(output["json"]["teams"]["away"]["hits"], 6);
        assert_eq!(output["query"]["timecode"], Value::Null);
    }

    #[tokio::test]
    async fn test_scoring_plays_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.1/game/565997/feed/live"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed()))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let output = json_output(
            execute(&service, "scoring_play_data", json!({"gameID": "565997"}))
                .await
                .unwrap(),
        );

        let plays = output["json"].as_array().unwrap();
        assert_eq!(plays.len(), 2);
        assert_eq!(plays[0]["result"]["description"], "Rhys Hoskins doubles.");
        assert_eq!(plays[1]["result"]["description"], "Rhys Hoskins walks.");

        let text = output["scoring plays"].as_str().unwrap();
        assert!(text.contains("Bottom 8 - Miami Marlins: 1, Philadelphia Phillies: 5"));
        assert!(!text.contains("Segura"));
    }

    #[tokio::test]
    async fn test_highlights_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/game/565997/content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let output = json_output(
            execute(&service, "game_highlight_data", json!({"gameID": 565997}))
                .await
                .unwrap(),
        );
        assert_eq!(output["game highlights"], "");
        assert_eq!(output["json"], json!([]));
    }

    #[tokio::test]
    async fn test_game_pace_passes_season() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/gamePace"))
            .and(query_param("season", "2021"))
            .and(query_param("sportId", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sports": []})))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        let output = json_output(
            execute(&service, "game_pace_data", json!({"season": "2021"}))
                .await
                .unwrap(),
        );
        assert_eq!(output["game_pace_data"], json!({"sports": []}));
    }

    #[tokio::test]
    async fn test_schedule_summaries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/schedule"))
            .and(query_param("date", "2019-04-24"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dates": [{
                    "date": "2019-04-24",
                    "games": [{
                        "gamePk": 565997,
                        "gameDate": "2019-04-24T23:05:00Z",
                        "officialDate": "2019-04-24",
                        "status": {"detailedState": "Final", "abstractGameCode": "F"},
                        "teams": {
                            "away": {"team": {"id": 121, "name": "New York Mets"}, "score": 6, "isWinner": false},
                            "home": {"team": {"id": 143, "name": "Philadelphia Phillies"}, "score": 8, "isWinner": true}
                        }
                    }]
                }]
            })))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let output = json_output(
            execute(&service, "game_schedule", json!({"date": "2019-04-24"}))
                .await
                .unwrap(),
        );

        assert_eq!(output["count"], 1);
        let game = &output["games"][0];
        assert_eq!(game["game_id"], 565997);
        assert_eq!(game["winning_team"], "Philadelphia Phillies");
        assert_eq!(
            game["summary"],
            "2019-04-24 - New York Mets (6) @ Philadelphia Phillies (8) (Final)"
        );
    }

    #[tokio::test]
    async fn test_schedule_for_past_date_is_stable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/schedule"))
            .and(query_param("date", "07/04/2018"))
            .and(query_param("teamId", "143"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dates": [{
                    "date": "2018-07-04",
                    "games": [{
                        "gamePk": 530412,
                        "gameDate": "2018-07-04T17:05:00Z",
                        "officialDate": "2018-07-04",
                        "status": {"detailedState": "Final", "abstractGameCode": "F"},
                        "teams": {
                            "away": {"team": {"id": 144, "name": "Atlanta Braves"}, "score": 2, "isWinner": false},
                            "home": {"team": {"id": 143, "name": "Philadelphia Phillies"}, "score": 5, "isWinner": true}
                        }
                    }]
                }]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let service = service_for(&server);
        let args = json!({"date": "07/04/2018", "team_id": 143});
        let first = json_output(execute(&service, "game_schedule", args.clone()).await.unwrap());
        let second = json_output(execute(&service, "game_schedule", args).await.unwrap());

        assert_eq!(first, second);
        assert_eq!(first["count"], 1);
        assert_eq!(first["query"]["team_id"], 143);
    }

    #[tokio::test]
    async fn test_schedule_rejects_bad_date() {
        let server = MockServer::start().await;
        let service = service_for(&server);
        let err = execute(&service, "game_schedule", json!({"start_date": "July 1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
        assert!(err.to_string().contains("start_date"));
    }
}
