mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use chrono::Utc;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::error;
use mlb_api::MlbApi;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(CliAction::Help) => {
            println!("{}", usage_text());
            return Ok(());
        }
        Ok(CliAction::Version) => {
            println!("mlbtui {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Ok(CliAction::Run(options)) => options,
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    let mut settings = AppSettings::load();
    options.apply(&mut settings);
    let client = match settings.api_url.as_deref() {
        Some(url) => MlbApi::with_base_url(url),
        None => MlbApi::new(),
    };

    if let Some(scope) = options.dump {
        return dump(&client, scope, &settings).await;
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic score refresh thread (every 30s)
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Load today's games on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DumpScope {
    Today,
    Yesterday,
    Team,
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    team: Option<String>,
    season: Option<i32>,
    dump: Option<DumpScope>,
}

impl CliOptions {
    /// Command line flags win over `MLBTUI_*` variables.
    fn apply(&self, settings: &mut AppSettings) {
        if let Some(team) = &self.team {
            settings.team = team.clone();
        }
        if self.season.is_some() {
            settings.season = self.season;
        }
    }
}

#[derive(Debug, PartialEq)]
enum CliAction {
    Help,
    Version,
    Run(CliOptions),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliAction, String> {
    let mut options = CliOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "--team" => {
                let team = args.next().ok_or("--team needs a team name")?;
                options.team = Some(team);
            }
            "--season" => {
                let raw = args.next().ok_or("--season needs a year")?;
                let season = raw.parse().map_err(|_| format!("Invalid season: {raw}"))?;
                options.season = Some(season);
            }
            "--dump" => {
                let raw = args.next().ok_or("--dump needs today, yesterday or team")?;
                options.dump = Some(match raw.as_str() {
                    "today" => DumpScope::Today,
                    "yesterday" => DumpScope::Yesterday,
                    "team" => DumpScope::Team,
                    _ => return Err(format!("Unknown dump scope: {raw}")),
                });
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }
    Ok(CliAction::Run(options))
}

fn usage_text() -> &'static str {
    "mlbtui - MLB scoreboard terminal UI

Usage:
  mlbtui [--team <name>] [--season <year>]
  mlbtui --dump <today|yesterday|team> [--team <name>] [--season <year>]
  mlbtui --help
  mlbtui --version

Environment:
  MLBTUI_TEAM      Team shown on the Team tab (default boston)
  MLBTUI_SEASON    Season year for the Team tab (default current season)
  MLBTUI_LOG       Log level: error, warn, info, debug, trace (default error)
  MLBTUI_API_URL   Stats API base URL (default https://statsapi.mlb.com/api/v1)"
}

/// Print one scope's buckets as JSON instead of starting the UI.
async fn dump(client: &MlbApi, scope: DumpScope, settings: &AppSettings) -> anyhow::Result<()> {
    let now = Utc::now();
    let json = match scope {
        DumpScope::Today => serde_json::to_string_pretty(&mlb_api::todays_games(client, now).await?)?,
        DumpScope::Yesterday => serde_json::to_string_pretty(&mlb_api::yesterdays_games(client, now).await?)?,
        DumpScope::Team => {
            let season = settings.season.unwrap_or_else(|| mlb_api::current_season(now));
            let report = mlb_api::team_report(client, &settings.team, season).await?;
            serde_json::to_string_pretty(&report)?
        }
    };
    println!("{json}");
    Ok(())
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = network_requests.send(NetworkRequest::LoadToday).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::TodayLoaded { games } => app.lock().await.on_today_loaded(games),
        NetworkResponse::YesterdayLoaded { games } => app.lock().await.on_yesterday_loaded(games),
        NetworkResponse::TeamLoaded { report } => app.lock().await.on_team_loaded(report),
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            app.lock().await.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        cursor::Hide,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All)
    );
    let _ = terminal::enable_raw_mode();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
