use chrono::{NaiveDate, TimeZone, Utc};
use mlb_api::aggregate::SEASON_LENGTH;
use mlb_api::{ApiError, DataFetcher, GameState, MlbApi, ScheduleQuery};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{Value, json};

const LINESCORE_PATH: &str = r"^/game/\d+/linescore$";

fn game(pk: u64, game_type: &str, state: &str, game_date: &str) -> Value {
    let started = state != "Preview";
    json!({
        "gamePk": pk,
        "gameType": game_type,
        "gameDate": game_date,
        "status": { "abstractGameState": state, "detailedState": state },
        "venue": { "name": "Fenway Park" },
        "teams": {
            "home": {
                "team": { "id": 111, "name": "Boston Red Sox" },
                "score": if started { json!(6) } else { Value::Null },
                "leagueRecord": { "wins": 84, "losses": 78, "pct": ".519" }
            },
            "away": {
                "team": { "id": 110, "name": "Baltimore Orioles" },
                "score": if started { json!(4) } else { Value::Null },
                "leagueRecord": { "wins": 54, "losses": 108, "pct": ".333" }
            }
        }
    })
}

/// Boston's 2019 schedule: spring training and an exhibition up front, then
/// 162 regular season games with three double-headers. Games before
/// `final_through` are Final, the rest Preview.
fn boston_2019(final_through: u64) -> String {
    let mut dates = Vec::new();
    let mut day = NaiveDate::from_ymd_opt(2019, 2, 22).unwrap();
    for i in 0..10 {
        let label = day.format("%Y-%m-%d").to_string();
        dates.push(json!({
            "date": label,
            "games": [game(900_000 + i, "S", "Final", &format!("{label}T18:05:00Z"))]
        }));
        day = day.succ_opt().unwrap();
    }
    dates.push(json!({
        "date": "2019-03-26",
        "games": [game(900_100, "E", "Final", "2019-03-26T23:05:00Z")]
    }));

    let double_headers = [40, 80, 120];
    let mut day = NaiveDate::from_ymd_opt(2019, 3, 28).unwrap();
    let mut n = 0u64;
    while n < SEASON_LENGTH as u64 {
        let per_day = if double_headers.contains(&n) { 2 } else { 1 };
        let label = day.format("%Y-%m-%d").to_string();
        let games: Vec<Value> = (0..per_day)
            .map(|k| {
                let i = n + k;
                let state = if i < final_through { "Final" } else { "Preview" };
                game(565_000 + i, "R", state, &format!("{label}T{}:05:00Z", 17 + 6 * k))
            })
            .collect();
        dates.push(json!({ "date": label, "games": games }));
        n += per_day;
        day = day.succ_opt().unwrap();
    }

    json!({ "totalGames": n, "dates": dates }).to_string()
}

fn linescore_body() -> String {
    json!({
        "currentInning": 9,
        "inningState": "Bottom",
        "scheduledInnings": 9,
        "innings": (1..=9).map(|num| json!({
            "num": num,
            "home": { "runs": if num == 1 { 6 } else { 0 }, "hits": 1 },
            "away": { "runs": if num == 9 { 4 } else { 0 }, "hits": 1 }
        })).collect::<Vec<_>>(),
        "teams": {
            "home": { "runs": 6, "hits": 9, "errors": 0, "leftOnBase": 5 },
            "away": { "runs": 4, "hits": 9, "errors": 1, "leftOnBase": 8 }
        }
    })
    .to_string()
}

fn roster_body() -> String {
    json!({ "roster": [
        { "person": { "id": 593428, "fullName": "Xander Bogaerts" }, "jerseyNumber": "2",
          "position": { "abbreviation": "SS" }, "status": { "description": "Active" } },
        { "person": { "id": 646240, "fullName": "Rafael Devers" }, "jerseyNumber": "11",
          "position": { "abbreviation": "3B" }, "status": { "description": "Active" } }
    ] })
    .to_string()
}

async fn mock_team_season(server: &mut ServerGuard, final_through: u64) -> (mockito::Mock, mockito::Mock) {
    let schedule = server
        .mock("GET", "/schedule")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("teamId".into(), "111".into()),
            Matcher::UrlEncoded("sportId".into(), "1".into()),
            Matcher::UrlEncoded("startDate".into(), "2019-01-01".into()),
            Matcher::UrlEncoded("endDate".into(), "2019-12-31".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(boston_2019(final_through))
        .create_async()
        .await;
    let linescores = server
        .mock("GET", Matcher::Regex(LINESCORE_PATH.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(linescore_body())
        .expect(final_through as usize)
        .create_async()
        .await;
    server
        .mock("GET", "/teams/111/roster")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(roster_body())
        .create_async()
        .await;
    (schedule, linescores)
}

#[tokio::test]
async fn boston_2019_complete_season_sums_to_162() {
    let mut server = Server::new_async().await;
    let (schedule, linescores) = mock_team_season(&mut server, SEASON_LENGTH as u64).await;
    let api = MlbApi::with_base_url(server.url());

    let report = mlb_api::team_report(&api, "boston", 2019).await.expect("team report");

    schedule.assert_async().await;
    linescores.assert_async().await;
    assert_eq!(report.team.name, "Boston Red Sox");
    assert_eq!(report.schedule.played.len() + report.schedule.remaining.len(), 162);
    assert_eq!(report.schedule.total(), SEASON_LENGTH);
    assert!(report.schedule.remaining.is_empty());
    assert!(report.schedule.played.iter().all(|g| g.linescore.is_some() && g.home_score == Some(6)));
    assert_eq!(report.roster.len(), 2);

    let opening = &report.schedule.season[0];
    assert_eq!(opening.date, NaiveDate::from_ymd_opt(2019, 3, 28).unwrap());
    assert_eq!(opening.start_time, "12:05");
    assert_eq!(opening.home_record, "84-78");
}

#[tokio::test]
async fn boston_2019_mid_season_splits_played_and_remaining() {
    let mut server = Server::new_async().await;
    let (_, linescores) = mock_team_season(&mut server, 100).await;
    let api = MlbApi::with_base_url(server.url());

    let report = mlb_api::team_report(&api, "Red Sox", 2019).await.expect("team report");

    linescores.assert_async().await;
    assert_eq!(report.schedule.played.len(), 100);
    assert_eq!(report.schedule.remaining.len(), 62);
    assert_eq!(report.schedule.played.len() + report.schedule.remaining.len(), 162);
    assert!(report.schedule.remaining.iter().all(|g| g.home_score.is_none() && g.linescore.is_none()));

    // Both halves of each double-header are present and in order.
    let season = &report.schedule.season;
    let same_day = season.windows(2).filter(|w| w[0].date == w[1].date).count();
    assert_eq!(same_day, 3);
    assert!(season.windows(2).all(|w| w[0].game_id < w[1].game_id));
}

#[tokio::test]
async fn todays_games_degrade_during_linescore_outage() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/schedule")
        .match_query(Matcher::UrlEncoded("date".into(), "2019-07-04".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "dates": [{ "date": "2019-07-04", "games": [
                game(1, "R", "Final", "2019-07-04T17:05:00Z"),
                game(2, "R", "Live", "2019-07-04T20:10:00Z"),
                game(3, "R", "Preview", "2019-07-04T23:10:00Z"),
                game(4, "A", "Preview", "2019-07-04T23:30:00Z")
            ] }] })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", Matcher::Regex(LINESCORE_PATH.into()))
        .with_status(503)
        .create_async()
        .await;

    let api = MlbApi::with_base_url(server.url());
    let as_of = Utc.with_ymd_and_hms(2019, 7, 4, 21, 0, 0).unwrap();
    let today = mlb_api::todays_games(&api, as_of).await.expect("today");

    assert_eq!(today.all.len(), 3);
    assert_eq!(today.completed.len(), 1);
    assert_eq!(today.unplayed.len(), 1);
    assert_eq!(today.live.len(), 1);
    assert_eq!(today.live[0].state, GameState::Live);
    assert!(today.live[0].linescore.is_none());
    assert_eq!(today.live[0].away_score, Some(4));
}

#[tokio::test]
async fn schedule_server_error_aborts_scope() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/schedule")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let api = MlbApi::with_base_url(server.url());
    let as_of = Utc.with_ymd_and_hms(2019, 7, 4, 21, 0, 0).unwrap();
    match mlb_api::todays_games(&api, as_of).await {
        Err(ApiError::Api(_, url)) => assert!(url.contains("date=2019-07-04")),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_resource_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/game/1/linescore")
        .with_status(404)
        .create_async()
        .await;

    let api = MlbApi::with_base_url(server.url());
    assert!(matches!(api.fetch_linescore(1).await, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn fetch_schedule_returns_raw_dates_untouched() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/schedule")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "dates": [ { "date": "2019-04-01", "games": "garbled" }, 7 ] }"#)
        .create_async()
        .await;

    let api = MlbApi::with_base_url(server.url());
    let day = NaiveDate::from_ymd_opt(2019, 4, 1).unwrap();
    let dates = api.fetch_schedule(&ScheduleQuery::Date(day)).await.expect("raw dates");
    assert_eq!(dates.len(), 2);
    assert_eq!(dates[0].date(), Some("2019-04-01"));
    assert_eq!(dates[1].date(), None);
}
