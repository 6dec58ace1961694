use crate::aggregate::{Aggregator, DayGames, TeamSchedule, TodayGames};
use crate::classify::{classify, parse_game};
use crate::client::{ApiError, ApiResult, DataFetcher, ScheduleQuery};
use crate::record::build_with_linescore;
use crate::schedule::games_for_date;
use crate::statsapi::{RawGame, ScheduleDate};
use crate::teams::{self, Team};
use crate::{GameRecord, GameState, RosterEntry};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::America::New_York;
use futures_util::{StreamExt, future, stream};
use log::{debug, warn};
use serde::Serialize;

/// Linescore fetches in flight at once for one batch.
const LINESCORE_CONCURRENCY: usize = 8;

/// A club's season plus its current roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub team: Team,
    pub schedule: TeamSchedule,
    pub roster: Vec<RosterEntry>,
}

/// Baseball's calendar day is the US Eastern one.
fn eastern_date(as_of: DateTime<Utc>) -> NaiveDate {
    as_of.with_timezone(&New_York).date_naive()
}

/// Season year in effect at `as_of`.
pub fn current_season(as_of: DateTime<Utc>) -> i32 {
    eastern_date(as_of).year()
}

/// Today's games split into unplayed / live / completed.
pub async fn todays_games(fetcher: &dyn DataFetcher, as_of: DateTime<Utc>) -> ApiResult<TodayGames> {
    classify_scope(fetcher, ScheduleQuery::Date(eastern_date(as_of))).await
}

/// Yesterday's games as one flat list.
pub async fn yesterdays_games(fetcher: &dyn DataFetcher, as_of: DateTime<Utc>) -> ApiResult<DayGames> {
    let yesterday = eastern_date(as_of)
        .pred_opt()
        .ok_or_else(|| ApiError::Other(format!("no day before {as_of}")))?;
    classify_scope(fetcher, ScheduleQuery::Date(yesterday)).await
}

/// One club's regular season, split into played / remaining / live.
pub async fn team_schedule(fetcher: &dyn DataFetcher, team: &Team, season: i32) -> ApiResult<TeamSchedule> {
    let query = ScheduleQuery::TeamSeason { team_id: team.id, season };
    let schedule: TeamSchedule = classify_scope(fetcher, query).await?;
    debug!(
        "{} {season}: {} played, {} remaining, {} live",
        team.name,
        schedule.played.len(),
        schedule.remaining.len(),
        schedule.live.len()
    );
    Ok(schedule)
}

/// Resolve a team by name, then fetch its season and roster side by side.
pub async fn team_report(fetcher: &dyn DataFetcher, name: &str, season: i32) -> ApiResult<TeamReport> {
    let team = teams::resolve(name)?;
    let (schedule, roster) =
        future::try_join(team_schedule(fetcher, &team, season), fetcher.fetch_roster(team.id)).await?;
    Ok(TeamReport { team, schedule, roster })
}

/// Fetch one schedule window and classify it. A failed schedule fetch
/// aborts the whole scope; nothing partial is returned.
async fn classify_scope<A: Aggregator>(fetcher: &dyn DataFetcher, query: ScheduleQuery) -> ApiResult<A> {
    let dates = fetcher.fetch_schedule(&query).await?;
    Ok(classify_dates(fetcher, dates).await)
}

/// Run a fetched schedule through slot resolution, classification and record
/// building, and collect the result into `A`'s buckets in schedule order.
pub async fn classify_dates<A: Aggregator>(fetcher: &dyn DataFetcher, dates: Vec<ScheduleDate>) -> A {
    let classified = classify_games(&dates);

    let records: Vec<Option<GameRecord>> = stream::iter(classified)
        .map(move |(game, state)| async move {
            build_with_linescore(fetcher, &game, state)
                .await
                .map_err(|e| warn!("skipping game {}: {e}", game.game_pk))
                .ok()
        })
        .buffered(LINESCORE_CONCURRENCY)
        .collect()
        .await;

    let mut buckets = A::default();
    for record in records.into_iter().flatten() {
        buckets.insert(record);
    }
    buckets
}

/// Parse and classify every game of every date, in order. Malformed games
/// and excluded ones are dropped here.
fn classify_games(dates: &[ScheduleDate]) -> Vec<(RawGame, GameState)> {
    let mut out = Vec::new();
    for entry in dates {
        let label = entry.date().unwrap_or("unknown date");
        for value in games_for_date(entry) {
            let game = match parse_game(value) {
                Ok(game) => game,
                Err(e) => {
                    warn!("skipping game on {label}: {e}");
                    continue;
                }
            };
            match classify(&game) {
                Ok(state) => out.push((game, state)),
                Err(skip) => debug!("excluding game {}: {skip}", game.game_pk),
            }
        }
    }
    out
}
