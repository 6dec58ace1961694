use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use mlb_api::{DayGames, TeamReport, TodayGames};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadToday,
    LoadYesterday,
    LoadTeam { name: String, season: Option<i32> },
    /// Reload today's games only; sent by the periodic refresher.
    RefreshScores,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TodayLoaded { games: TodayGames },
    YesterdayLoaded { games: DayGames },
    TeamLoaded { report: TeamReport },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
