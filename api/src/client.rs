use crate::statsapi::{LinescoreResponse, RawLineStats, RosterResponse, ScheduleDate, ScheduleResponse};
use crate::{Inning, LineTotals, Linescore, RosterEntry};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const STATSAPI_V1: &str = "https://statsapi.mlb.com/api/v1";
/// sportId=1 is Major League Baseball.
const SPORT_ID_MLB: u8 = 1;

/// Which window of the schedule to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleQuery {
    Date(NaiveDate),
    TeamSeason { team_id: u32, season: i32 },
}

impl ScheduleQuery {
    fn query_string(&self) -> String {
        match self {
            ScheduleQuery::Date(date) => {
                format!("sportId={SPORT_ID_MLB}&date={}", date.format("%Y-%m-%d"))
            }
            ScheduleQuery::TeamSeason { team_id, season } => format!(
                "teamId={team_id}&sportId={SPORT_ID_MLB}&startDate={season}-01-01&endDate={season}-12-31"
            ),
        }
    }
}

/// Everything the classification pipeline needs from the network.
#[async_trait]
pub trait DataFetcher: Send + Sync {
    async fn fetch_schedule(&self, query: &ScheduleQuery) -> ApiResult<Vec<ScheduleDate>>;

    async fn fetch_linescore(&self, game_id: u64) -> ApiResult<Linescore>;

    async fn fetch_roster(&self, team_id: u32) -> ApiResult<Vec<RosterEntry>>;
}

/// MLB Stats API client. One connection pool per value; clone to share it.
#[derive(Debug, Clone)]
pub struct MlbApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for MlbApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("mlbtui/0.1 (terminal scoreboard)")
                .build()
                .unwrap_or_default(),
            base_url: STATSAPI_V1.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    TeamNotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::TeamNotFound(name) => write!(f, "Team {name} not found"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

impl MlbApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                Err(ApiError::NotFound(url.to_owned()))
            }
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

#[async_trait]
impl DataFetcher for MlbApi {
    async fn fetch_schedule(&self, query: &ScheduleQuery) -> ApiResult<Vec<ScheduleDate>> {
        let url = format!("{}/schedule?{}", self.base_url, query.query_string());
        let raw: ScheduleResponse = self.get(&url).await?;
        Ok(raw.dates)
    }

    async fn fetch_linescore(&self, game_id: u64) -> ApiResult<Linescore> {
        let url = format!("{}/game/{game_id}/linescore", self.base_url);
        let raw: LinescoreResponse = self.get(&url).await?;
        Ok(map_linescore(raw))
    }

    async fn fetch_roster(&self, team_id: u32) -> ApiResult<Vec<RosterEntry>> {
        let url = format!("{}/teams/{team_id}/roster", self.base_url);
        let raw: RosterResponse = self.get(&url).await?;
        Ok(map_roster(raw))
    }
}

// ---------------------------------------------------------------------------
// Mapping: statsapi wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_linescore(raw: LinescoreResponse) -> Linescore {
    let innings = raw
        .innings
        .into_iter()
        .map(|i| Inning {
            number: i.num,
            home_runs: i.home.and_then(|s| s.runs),
            away_runs: i.away.and_then(|s| s.runs),
        })
        .collect();

    let (home, away) = raw
        .teams
        .map(|t| (map_totals(t.home), map_totals(t.away)))
        .unwrap_or_default();

    Linescore {
        current_inning: raw.current_inning,
        inning_state: raw.inning_state,
        scheduled_innings: raw.scheduled_innings.unwrap_or(9),
        innings,
        home,
        away,
    }
}

fn map_totals(stats: Option<RawLineStats>) -> LineTotals {
    let s = stats.unwrap_or_default();
    LineTotals {
        runs: s.runs.unwrap_or_default(),
        hits: s.hits.unwrap_or_default(),
        errors: s.errors.unwrap_or_default(),
        left_on_base: s.left_on_base.unwrap_or_default(),
    }
}

fn map_roster(raw: RosterResponse) -> Vec<RosterEntry> {
    raw.roster
        .into_iter()
        .map(|r| RosterEntry {
            id: r.person.id,
            name: r.person.full_name,
            jersey_number: r.jersey_number.filter(|n| !n.is_empty()),
            position: r
                .position
                .and_then(|p| p.abbreviation.or(p.name))
                .unwrap_or_else(|| "-".into()),
            status: r.status.and_then(|s| s.description),
        })
        .collect()
}
