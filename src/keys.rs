use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    let request = match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Today),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Yesterday),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Team),
        (_, Char('4'), _) => guard.update_tab(MenuItem::GameDetail),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => {
            guard.exit_help();
            None
        }
        (MenuItem::GameDetail, KeyCode::Esc, _) => {
            guard.close_game_detail();
            None
        }

        // Today panes
        (MenuItem::Today, Char('l') | KeyCode::Right | KeyCode::Tab, _) => {
            guard.next_pane();
            None
        }
        (MenuItem::Today, Char('h') | KeyCode::Left | KeyCode::BackTab, _) => {
            guard.prev_pane();
            None
        }

        // Game lists
        (_, Char('j') | KeyCode::Down, _) => {
            guard.move_down();
            None
        }
        (_, Char('k') | KeyCode::Up, _) => {
            guard.move_up();
            None
        }
        (_, KeyCode::Enter, _) => {
            guard.open_selected_game();
            None
        }

        // Global
        (_, Char('r'), _) => guard.reload_request(),
        (_, Char('f'), _) => {
            guard.toggle_full_screen();
            None
        }
        (_, Char('"'), _) => {
            guard.toggle_show_logs();
            None
        }

        _ => None,
    };

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
