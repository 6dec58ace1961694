use crate::{GameRecord, GameState};
use serde::Serialize;

/// Regular season length for one club.
pub const SEASON_LENGTH: usize = 162;

/// Routes normalized records into scope-specific buckets.
///
/// Records arrive in schedule order and are appended; buckets are never
/// re-sorted.
pub trait Aggregator: Default {
    fn insert(&mut self, record: GameRecord);
}

/// Today's slate, split by state, plus everything in one list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodayGames {
    pub all: Vec<GameRecord>,
    pub unplayed: Vec<GameRecord>,
    pub live: Vec<GameRecord>,
    pub completed: Vec<GameRecord>,
}

impl Aggregator for TodayGames {
    fn insert(&mut self, record: GameRecord) {
        self.all.push(record.clone());
        match record.state {
            GameState::Preview => self.unplayed.push(record),
            GameState::Live => self.live.push(record),
            GameState::Final => self.completed.push(record),
        }
    }
}

/// A flat list for one calendar day (yesterday's results).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayGames {
    pub games: Vec<GameRecord>,
}

impl Aggregator for DayGames {
    fn insert(&mut self, record: GameRecord) {
        self.games.push(record);
    }
}

/// One club's season.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamSchedule {
    pub played: Vec<GameRecord>,
    pub remaining: Vec<GameRecord>,
    pub live: Vec<GameRecord>,
    /// Every game in schedule order.
    pub season: Vec<GameRecord>,
}

impl TeamSchedule {
    /// played + remaining + live; equals SEASON_LENGTH for a full regular season.
    pub fn total(&self) -> usize {
        self.played.len() + self.remaining.len() + self.live.len()
    }
}

impl Aggregator for TeamSchedule {
    fn insert(&mut self, record: GameRecord) {
        self.season.push(record.clone());
        match record.state {
            GameState::Final => self.played.push(record),
            GameState::Preview => self.remaining.push(record),
            GameState::Live => self.live.push(record),
        }
    }
}
