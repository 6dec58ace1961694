pub mod aggregate;
pub mod classify;
pub mod client;
pub mod pipeline;
pub mod record;
pub mod schedule;
pub mod statsapi;
pub mod teams;
pub mod time;

pub use aggregate::{Aggregator, DayGames, TeamSchedule, TodayGames};
pub use client::{ApiError, ApiResult, DataFetcher, MlbApi, ScheduleQuery};
pub use pipeline::{TeamReport, current_season, team_report, team_schedule, todays_games, yesterdays_games};
pub use teams::{Team, resolve};

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of statsapi wire format
// ---------------------------------------------------------------------------

/// Coarse lifecycle of a game, collapsed from upstream's abstract game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameState {
    Preview,
    Live,
    Final,
}

impl GameState {
    pub fn label(&self) -> &'static str {
        match self {
            GameState::Preview => "Preview",
            GameState::Live => "Live",
            GameState::Final => "Final",
        }
    }

    /// Live and Final games carry scores and a linescore.
    pub fn has_started(&self) -> bool {
        matches!(self, GameState::Live | GameState::Final)
    }
}

/// Upstream `gameType` code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameType {
    Regular,            // R
    SpringTraining,     // S
    Exhibition,         // E
    AllStar,            // A
    WildCard,           // F
    DivisionSeries,     // D
    LeagueChampionship, // L
    WorldSeries,        // W
    Postseason,         // P
    Other(String),
}

impl GameType {
    pub const KNOWN_CODES: [&'static str; 9] = ["R", "S", "E", "A", "F", "D", "L", "W", "P"];

    pub fn from_code(code: &str) -> Self {
        match code {
            "R" => GameType::Regular,
            "S" => GameType::SpringTraining,
            "E" => GameType::Exhibition,
            "A" => GameType::AllStar,
            "F" => GameType::WildCard,
            "D" => GameType::DivisionSeries,
            "L" => GameType::LeagueChampionship,
            "W" => GameType::WorldSeries,
            "P" => GameType::Postseason,
            other => GameType::Other(other.to_owned()),
        }
    }

    pub fn is_regular_season(&self) -> bool {
        *self == GameType::Regular
    }
}

/// One normalized regular-season game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub game_id: u64,
    pub date: NaiveDate,
    pub start_time: String, // "7:10", Eastern, 12-hour, no suffix
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
    pub home_record: String, // "84-78"
    pub away_record: String,
    pub state: GameState,
    pub detailed_state: String, // "Scheduled", "In Progress", "Final", "Delayed"...
    pub linescore: Option<Linescore>,
    pub venue: Option<String>,
    /// 1 for a normal game, 2+ for later games of a double-header.
    pub game_number: u8,
}

impl GameRecord {
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }

    pub fn score_line(&self) -> Option<String> {
        let (away, home) = self.away_score.zip(self.home_score)?;
        Some(format!("{away}-{home}"))
    }
}

/// Inning-by-inning breakdown for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Linescore {
    pub current_inning: Option<u8>,
    pub inning_state: Option<String>,
    pub scheduled_innings: u8,
    pub innings: Vec<Inning>,
    pub home: LineTotals,
    pub away: LineTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inning {
    pub number: u8,
    pub home_runs: Option<u16>, // None = half inning not played
    pub away_runs: Option<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineTotals {
    pub runs: u16,
    pub hits: u16,
    pub errors: u16,
    pub left_on_base: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterEntry {
    pub id: u64,
    pub name: String,
    pub jersey_number: Option<String>,
    pub position: String, // "SS", "P", "TWP"...
    pub status: Option<String>,
}

/// Per-game failure: the affected game is skipped, the batch continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Time(String),
    Date(String),
    Payload(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Time(raw) => write!(f, "malformed time of day: {raw:?}"),
            ParseError::Date(raw) => write!(f, "malformed game date: {raw:?}"),
            ParseError::Payload(msg) => write!(f, "malformed game payload: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}
