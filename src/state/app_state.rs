use crate::app::MenuItem;
use chrono::Local;
use mlb_api::{DayGames, GameRecord, GameState, TeamReport, TodayGames};

// ---------------------------------------------------------------------------
// Row cursor shared by every game list
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub selected: usize,
}

impl Cursor {
    pub fn down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// First row to draw so the selection stays inside `height` rows.
    pub fn scroll_offset(&self, height: usize) -> usize {
        (self.selected + 1).saturating_sub(height.max(1))
    }
}

/// Keep the same game selected across a reload when it is still listed.
fn reselect(cursor: &mut Cursor, previous: Option<u64>, games: &[GameRecord]) {
    if let Some(id) = previous
        && let Some(idx) = games.iter().position(|g| g.game_id == id)
    {
        cursor.selected = idx;
        return;
    }
    cursor.clamp(games.len());
}

// ---------------------------------------------------------------------------
// Today
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum TodayPane {
    #[default]
    Live,
    Upcoming,
    Final,
}

impl TodayPane {
    pub const ALL: [TodayPane; 3] = [TodayPane::Live, TodayPane::Upcoming, TodayPane::Final];

    pub fn title(&self) -> &'static str {
        match self {
            TodayPane::Live => "Live",
            TodayPane::Upcoming => "Upcoming",
            TodayPane::Final => "Final",
        }
    }

    fn next(self) -> Self {
        match self {
            TodayPane::Live => TodayPane::Upcoming,
            TodayPane::Upcoming => TodayPane::Final,
            TodayPane::Final => TodayPane::Live,
        }
    }

    fn prev(self) -> Self {
        match self {
            TodayPane::Live => TodayPane::Final,
            TodayPane::Upcoming => TodayPane::Live,
            TodayPane::Final => TodayPane::Upcoming,
        }
    }
}

#[derive(Debug, Default)]
pub struct TodayState {
    pub games: Option<TodayGames>,
    pub pane: TodayPane,
    pub cursor: Cursor,
    pub loaded_at: Option<String>,
}

impl TodayState {
    pub fn load(&mut self, games: TodayGames) {
        let previous = self.selected_game().map(|g| g.game_id);
        let first_load = self.games.is_none();
        self.games = Some(games);
        self.loaded_at = Some(Local::now().format("%H:%M:%S").to_string());

        if first_load {
            // open on whichever pane has something to show
            self.pane = TodayPane::ALL
                .into_iter()
                .find(|p| !self.pane_games(*p).is_empty())
                .unwrap_or_default();
            self.cursor = Cursor::default();
            return;
        }
        let pane_games = self.pane_games(self.pane).to_vec();
        reselect(&mut self.cursor, previous, &pane_games);
    }

    pub fn pane_games(&self, pane: TodayPane) -> &[GameRecord] {
        let Some(games) = &self.games else {
            return &[];
        };
        match pane {
            TodayPane::Live => &games.live,
            TodayPane::Upcoming => &games.unplayed,
            TodayPane::Final => &games.completed,
        }
    }

    pub fn next_pane(&mut self) {
        self.pane = self.pane.next();
        self.cursor = Cursor::default();
    }

    pub fn prev_pane(&mut self) {
        self.pane = self.pane.prev();
        self.cursor = Cursor::default();
    }

    pub fn down(&mut self) {
        let len = self.pane_games(self.pane).len();
        self.cursor.down(len);
    }

    pub fn up(&mut self) {
        self.cursor.up();
    }

    pub fn selected_game(&self) -> Option<&GameRecord> {
        self.pane_games(self.pane).get(self.cursor.selected)
    }
}

// ---------------------------------------------------------------------------
// Yesterday
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct YesterdayState {
    pub games: Option<DayGames>,
    pub cursor: Cursor,
}

impl YesterdayState {
    pub fn load(&mut self, games: DayGames) {
        let previous = self.selected_game().map(|g| g.game_id);
        reselect(&mut self.cursor, previous, &games.games);
        self.games = Some(games);
    }

    pub fn list(&self) -> &[GameRecord] {
        self.games.as_ref().map(|d| d.games.as_slice()).unwrap_or(&[])
    }

    pub fn down(&mut self) {
        let len = self.list().len();
        self.cursor.down(len);
    }

    pub fn up(&mut self) {
        self.cursor.up();
    }

    pub fn selected_game(&self) -> Option<&GameRecord> {
        self.list().get(self.cursor.selected)
    }
}

// ---------------------------------------------------------------------------
// Team season
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamState {
    pub report: Option<TeamReport>,
    pub cursor: Cursor,
}

impl TeamState {
    /// A new club or season starts the cursor at its next unplayed game.
    pub fn load(&mut self, report: TeamReport) {
        let opener = |r: &TeamReport| r.schedule.season.first().map(|g| g.game_id);
        let same_club = self
            .report
            .as_ref()
            .is_some_and(|r| r.team == report.team && opener(r) == opener(&report));
        if same_club {
            let previous = self.selected_game().map(|g| g.game_id);
            reselect(&mut self.cursor, previous, &report.schedule.season);
        } else {
            let next_game = report
                .schedule
                .season
                .iter()
                .position(|g| g.state != GameState::Final)
                .unwrap_or_else(|| report.schedule.season.len().saturating_sub(1));
            self.cursor = Cursor { selected: next_game };
        }
        self.report = Some(report);
    }

    pub fn season(&self) -> &[GameRecord] {
        self.report.as_ref().map(|r| r.schedule.season.as_slice()).unwrap_or(&[])
    }

    pub fn down(&mut self) {
        let len = self.season().len();
        self.cursor.down(len);
    }

    pub fn up(&mut self) {
        self.cursor.up();
    }

    pub fn selected_game(&self) -> Option<&GameRecord> {
        self.season().get(self.cursor.selected)
    }
}

// ---------------------------------------------------------------------------
// Game detail
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct GameDetailState {
    pub game: Option<GameRecord>,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub today: TodayState,
    pub yesterday: YesterdayState,
    pub team: TeamState,
    pub game_detail: GameDetailState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest copy of a game from any loaded list.
    pub fn find_game(&self, game_id: u64) -> Option<&GameRecord> {
        let today = self.today.games.as_ref().map(|t| t.all.as_slice()).unwrap_or(&[]);
        today
            .iter()
            .chain(self.yesterday.list())
            .chain(self.team.season())
            .find(|g| g.game_id == game_id)
    }

    /// Swap the open game for its freshest copy after a reload.
    pub fn refresh_detail(&mut self) {
        let Some(id) = self.game_detail.game.as_ref().map(|g| g.game_id) else {
            return;
        };
        if let Some(fresh) = self.find_game(id).cloned() {
            self.game_detail.game = Some(fresh);
        }
    }
}
