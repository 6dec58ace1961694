use crate::state::messages::{NetworkRequest, NetworkResponse};
use chrono::Utc;
use log::{debug, error};
use mlb_api::{ApiResult, MlbApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_FRAME: Duration = Duration::from_millis(33);
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Streams spinner frames to the UI while a request is in flight.
struct Spinner {
    running: Arc<AtomicBool>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl Spinner {
    async fn start(&self) {
        self.running.store(true, Ordering::Relaxed);
        self.publish(LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] }).await;

        let running = self.running.clone();
        let responses = self.responses.clone();
        tokio::spawn(async move {
            let mut frames = tokio::time::interval(SPINNER_FRAME);
            for spinner_char in SPINNER_CHARS.iter().copied().cycle().skip(1) {
                frames.tick().await;
                if !running.load(Ordering::Relaxed) {
                    break;
                }
                let loading_state = LoadingState { is_loading: true, spinner_char };
                let _ = responses.send(NetworkResponse::LoadingStateChanged { loading_state }).await;
            }
        });
    }

    /// Park the spinner, leaving `!` on screen when the request failed.
    async fn stop(&self, is_ok: bool) {
        self.running.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;
        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        self.publish(LoadingState { is_loading: false, spinner_char }).await;
    }

    async fn publish(&self, loading_state: LoadingState) {
        let _ = self.responses.send(NetworkResponse::LoadingStateChanged { loading_state }).await;
    }
}

/// Owns the Stats API client and serves UI requests one at a time.
pub struct NetworkWorker {
    client: MlbApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    spinner: Spinner,
}

impl NetworkWorker {
    pub fn new(
        client: MlbApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        let spinner = Spinner {
            running: Arc::new(AtomicBool::new(false)),
            responses: responses.clone(),
        };
        Self { client, requests, responses, spinner }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.spinner.start().await;
            let result = self.handle(request).await;
            self.spinner.stop(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });
            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle(&self, request: NetworkRequest) -> ApiResult<NetworkResponse> {
        let now = Utc::now();
        match request {
            NetworkRequest::LoadToday | NetworkRequest::RefreshScores => {
                debug!("loading today's games");
                let games = mlb_api::todays_games(&self.client, now).await?;
                Ok(NetworkResponse::TodayLoaded { games })
            }
            NetworkRequest::LoadYesterday => {
                debug!("loading yesterday's games");
                let games = mlb_api::yesterdays_games(&self.client, now).await?;
                Ok(NetworkResponse::YesterdayLoaded { games })
            }
            NetworkRequest::LoadTeam { name, season } => {
                let season = season.unwrap_or_else(|| mlb_api::current_season(now));
                debug!("loading {name} {season}");
                let report = mlb_api::team_report(&self.client, &name, season).await?;
                Ok(NetworkResponse::TeamLoaded { report })
            }
        }
    }
}
