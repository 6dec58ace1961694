use crate::client::DataFetcher;
use crate::statsapi::{RawGame, RawSide};
use crate::time::to_eastern_clock;
use crate::{GameRecord, GameState, ParseError};
use chrono::NaiveDate;
use log::warn;

/// Build a normalized record from a classified game. No network.
///
/// Scores are only carried once a game has started; a Preview record never
/// has them even if upstream sends zeros.
pub fn build_record(game: &RawGame, state: GameState) -> Result<GameRecord, ParseError> {
    let (date, start_time) = split_date_time(&game.game_date)?;
    let home = &game.teams.home;
    let away = &game.teams.away;

    let (home_score, away_score) = if state.has_started() {
        (home.score, away.score)
    } else {
        (None, None)
    };

    Ok(GameRecord {
        game_id: game.game_pk,
        date,
        start_time,
        home_team: home.team.name.clone(),
        away_team: away.team.name.clone(),
        home_score,
        away_score,
        home_record: league_record(home),
        away_record: league_record(away),
        state,
        detailed_state: game
            .status
            .detailed_state
            .clone()
            .unwrap_or_else(|| state.label().to_owned()),
        linescore: None,
        venue: game.venue.as_ref().and_then(|v| v.name.clone()),
        game_number: game.game_number.unwrap_or(1),
    })
}

/// Build the record and, for games already underway or over, attach the
/// linescore. A failed linescore fetch degrades to `linescore: None`.
pub async fn build_with_linescore(
    fetcher: &dyn DataFetcher,
    game: &RawGame,
    state: GameState,
) -> Result<GameRecord, ParseError> {
    let mut record = build_record(game, state)?;
    if state.has_started() {
        match fetcher.fetch_linescore(record.game_id).await {
            Ok(linescore) => record.linescore = Some(linescore),
            Err(e) => warn!("linescore unavailable for game {}: {e}", record.game_id),
        }
    }
    Ok(record)
}

/// "2019-03-28T20:05:00Z" → (2019-03-28, "3:05")
fn split_date_time(raw: &str) -> Result<(NaiveDate, String), ParseError> {
    let (date, time) = raw
        .split_once('T')
        .ok_or_else(|| ParseError::Date(raw.to_owned()))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ParseError::Date(raw.to_owned()))?;
    let start_time = to_eastern_clock(time.trim_end_matches('Z'))?;
    Ok((date, start_time))
}

fn league_record(side: &RawSide) -> String {
    side.league_record
        .as_ref()
        .map(|r| format!("{}-{}", r.wins, r.losses))
        .unwrap_or_else(|| "0-0".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::parse_game;
    use crate::client::{ApiError, ApiResult, ScheduleQuery};
    use crate::statsapi::ScheduleDate;
    use crate::{Linescore, LineTotals, RosterEntry};
    use async_trait::async_trait;
    use serde_json::json;

    struct Linescores(Option<Linescore>);

    #[async_trait]
    impl DataFetcher for Linescores {
        async fn fetch_schedule(&self, _: &ScheduleQuery) -> ApiResult<Vec<ScheduleDate>> {
            Ok(Vec::new())
        }

        async fn fetch_linescore(&self, game_id: u64) -> ApiResult<Linescore> {
            self.0
                .clone()
                .ok_or_else(|| ApiError::NotFound(format!("linescore {game_id}")))
        }

        async fn fetch_roster(&self, _: u32) -> ApiResult<Vec<RosterEntry>> {
            Ok(Vec::new())
        }
    }

    fn raw(state: &str, game_date: &str, scores: Option<(u16, u16)>) -> RawGame {
        let (home_score, away_score) = scores.unzip();
        parse_game(&json!({
            "gamePk": 566086,
            "gameType": "R",
            "gameDate": game_date,
            "gameNumber": 2,
            "status": { "abstractGameState": state, "detailedState": "Final" },
            "venue": { "name": "Fenway Park" },
            "teams": {
                "home": {
                    "team": { "id": 111, "name": "Boston Red Sox" },
                    "score": home_score,
                    "leagueRecord": { "wins": 84, "losses": 78 }
                },
                "away": {
                    "team": { "id": 110, "name": "Baltimore Orioles" },
                    "score": away_score,
                    "leagueRecord": { "wins": 54, "losses": 108 }
                }
            }
        }))
        .unwrap()
    }

    fn final_linescore() -> Linescore {
        Linescore {
            scheduled_innings: 9,
            home: LineTotals { runs: 5, hits: 10, errors: 0, left_on_base: 6 },
            away: LineTotals { runs: 4, hits: 8, errors: 1, left_on_base: 9 },
            ..Default::default()
        }
    }

    #[test]
    fn splits_date_and_converts_start_time() {
        let (date, time) = split_date_time("2019-09-29T17:05:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 9, 29).unwrap());
        assert_eq!(time, "12:05");
    }

    #[test]
    fn malformed_date_time_is_rejected() {
        assert!(matches!(split_date_time("2019-09-29 17:05:00"), Err(ParseError::Date(_))));
        assert!(matches!(split_date_time("2019-13-40T17:05:00Z"), Err(ParseError::Date(_))));
        assert!(matches!(split_date_time("2019-09-29TTBD"), Err(ParseError::Time(_))));
    }

    #[test]
    fn record_reads_teams_records_and_extras() {
        let rec = build_record(&raw("Final", "2019-09-29T17:05:00Z", Some((5, 4))), GameState::Final).unwrap();
        assert_eq!(rec.home_team, "Boston Red Sox");
        assert_eq!(rec.away_team, "Baltimore Orioles");
        assert_eq!(rec.home_record, "84-78");
        assert_eq!(rec.away_record, "54-108");
        assert_eq!(rec.detailed_state, "Final");
        assert_eq!(rec.venue.as_deref(), Some("Fenway Park"));
        assert_eq!(rec.game_number, 2);
        assert_eq!(rec.score_line().as_deref(), Some("4-5"));
        assert_eq!(rec.matchup(), "Baltimore Orioles @ Boston Red Sox");
    }

    #[tokio::test]
    async fn preview_has_no_scores_and_no_linescore() {
        let fetcher = Linescores(Some(final_linescore()));
        let game = raw("Preview", "2019-09-29T17:05:00Z", Some((0, 0)));
        let rec = build_with_linescore(&fetcher, &game, GameState::Preview).await.unwrap();
        assert_eq!(rec.home_score, None);
        assert_eq!(rec.away_score, None);
        assert!(rec.linescore.is_none());
    }

    #[tokio::test]
    async fn final_with_linescore_has_scores() {
        let fetcher = Linescores(Some(final_linescore()));
        let game = raw("Final", "2019-09-29T17:05:00Z", Some((5, 4)));
        let rec = build_with_linescore(&fetcher, &game, GameState::Final).await.unwrap();
        assert_eq!(rec.home_score, Some(5));
        assert_eq!(rec.away_score, Some(4));
        assert_eq!(rec.linescore, Some(final_linescore()));
    }

    #[tokio::test]
    async fn failed_linescore_fetch_still_emits_record() {
        let fetcher = Linescores(None);
        let game = raw("Live", "2019-09-29T17:05:00Z", Some((2, 1)));
        let rec = build_with_linescore(&fetcher, &game, GameState::Live).await.unwrap();
        assert_eq!(rec.state, GameState::Live);
        assert_eq!(rec.home_score, Some(2));
        assert!(rec.linescore.is_none());
    }

    #[test]
    fn missing_league_record_reads_as_even() {
        let game = parse_game(&json!({
            "gamePk": 1,
            "gameType": "R",
            "gameDate": "2019-03-28T20:05:00Z",
            "status": { "abstractGameState": "Preview" },
            "teams": {
                "home": { "team": { "name": "Seattle Mariners" } },
                "away": { "team": { "name": "Boston Red Sox" } }
            }
        }))
        .unwrap();
        let rec = build_record(&game, GameState::Preview).unwrap();
        assert_eq!(rec.home_record, "0-0");
        assert_eq!(rec.detailed_state, "Preview");
        assert_eq!(rec.game_number, 1);
        assert_eq!(rec.venue, None);
    }
}
