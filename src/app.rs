use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use mlb_api::{DayGames, GameRecord, TeamReport, TodayGames};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Today,
    Yesterday,
    Team,
    GameDetail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers: called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_today_loaded(&mut self, games: TodayGames) {
        self.state.last_error = None;
        self.state.today.load(games);
        self.state.refresh_detail();
    }

    pub fn on_yesterday_loaded(&mut self, games: DayGames) {
        self.state.last_error = None;
        self.state.yesterday.load(games);
        self.state.refresh_detail();
    }

    pub fn on_team_loaded(&mut self, report: TeamReport) {
        self.state.last_error = None;
        self.state.team.load(report);
        self.state.refresh_detail();
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    /// Switch tabs. Returns the request that fills the new tab the first
    /// time it is opened.
    pub fn update_tab(&mut self, next: MenuItem) -> Option<NetworkRequest> {
        if self.state.active_tab == next {
            return None;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        match next {
            MenuItem::Yesterday if self.state.yesterday.games.is_none() => Some(NetworkRequest::LoadYesterday),
            MenuItem::Team if self.state.team.report.is_none() => Some(self.team_request()),
            _ => None,
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    /// Request that reloads whatever the active tab shows.
    pub fn reload_request(&self) -> Option<NetworkRequest> {
        match self.state.active_tab {
            MenuItem::Today => Some(NetworkRequest::LoadToday),
            MenuItem::Yesterday => Some(NetworkRequest::LoadYesterday),
            MenuItem::Team => Some(self.team_request()),
            MenuItem::GameDetail => match self.state.previous_tab {
                MenuItem::Yesterday => Some(NetworkRequest::LoadYesterday),
                MenuItem::Team => Some(self.team_request()),
                _ => Some(NetworkRequest::LoadToday),
            },
            MenuItem::Help => None,
        }
    }

    fn team_request(&self) -> NetworkRequest {
        NetworkRequest::LoadTeam {
            name: self.settings.team.clone(),
            season: self.settings.season,
        }
    }

    // -----------------------------------------------------------------------
    // List navigation: delegated to the active tab's state
    // -----------------------------------------------------------------------

    pub fn move_down(&mut self) {
        match self.state.active_tab {
            MenuItem::Today => self.state.today.down(),
            MenuItem::Yesterday => self.state.yesterday.down(),
            MenuItem::Team => self.state.team.down(),
            _ => {}
        }
    }

    pub fn move_up(&mut self) {
        match self.state.active_tab {
            MenuItem::Today => self.state.today.up(),
            MenuItem::Yesterday => self.state.yesterday.up(),
            MenuItem::Team => self.state.team.up(),
            _ => {}
        }
    }

    pub fn next_pane(&mut self) {
        if self.state.active_tab == MenuItem::Today {
            self.state.today.next_pane();
        }
    }

    pub fn prev_pane(&mut self) {
        if self.state.active_tab == MenuItem::Today {
            self.state.today.prev_pane();
        }
    }

    pub fn selected_game(&self) -> Option<&GameRecord> {
        match self.state.active_tab {
            MenuItem::Today => self.state.today.selected_game(),
            MenuItem::Yesterday => self.state.yesterday.selected_game(),
            MenuItem::Team => self.state.team.selected_game(),
            _ => None,
        }
    }

    /// Open the selected game on the Game Detail tab.
    pub fn open_selected_game(&mut self) {
        let Some(game) = self.selected_game().cloned() else {
            return;
        };
        self.state.game_detail.game = Some(game);
        self.update_tab(MenuItem::GameDetail);
    }

    /// Leave Game Detail for the list it was opened from.
    pub fn close_game_detail(&mut self) {
        if self.state.active_tab == MenuItem::GameDetail {
            self.state.active_tab = match self.state.previous_tab {
                MenuItem::GameDetail | MenuItem::Help => MenuItem::Today,
                tab => tab,
            };
        }
    }
}
