use chrono::Datelike;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::linescore::{LinescoreView, status_line};
use crate::state::app_state::{Cursor, TodayPane};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use mlb_api::{GameRecord, GameState};

static TABS: &[&str; 4] = &["Today", "Yesterday", "Team", "Game Detail"];

const HELP_TEXT: &str = "\
1  Today        live, upcoming and final games
2  Yesterday    yesterday's results
3  Team         season schedule and roster
4  Game Detail  linescore for the open game

j/k  ↓/↑     move selection
h/l  ←/→     switch pane on Today
Enter        open selected game
Esc          back
r            reload current tab
f            full screen
\"            toggle log pane
?            this help
q            quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Today => draw_today(f, layout.main, app),
            MenuItem::Yesterday => draw_yesterday(f, layout.main, app),
            MenuItem::Team => draw_team(f, layout.main, app),
            MenuItem::GameDetail => draw_game_detail(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Today => 0,
        MenuItem::Yesterday => 1,
        MenuItem::Team => 2,
        MenuItem::GameDetail => 3,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

/// Shown while a tab has no data yet: the last error, or a loading note.
fn draw_waiting(f: &mut Frame, area: Rect, app: &App, what: &str) {
    let msg = if let Some(err) = app.state.last_error.as_deref() {
        format!("{what} load failed:\n{err}\n\nPress r to retry")
    } else {
        format!("Loading {what}...")
    };
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_today(f: &mut Frame, area: Rect, app: &App) {
    let today = &app.state.today;
    let title = match today.loaded_at.as_deref() {
        Some(at) => format!(" Today · updated {at} "),
        None => " Today ".to_string(),
    };

    if today.games.is_none() {
        let block = default_border(Color::White).title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);
        draw_waiting(f, inner, app, "today's games");
        return;
    }

    let panes: [Rect; 3] = if area.width >= 120 {
        Layout::horizontal([Constraint::Fill(1); 3]).areas(area)
    } else {
        Layout::vertical([Constraint::Fill(1); 3]).areas(area)
    };

    for (pane, pane_area) in TodayPane::ALL.into_iter().zip(panes) {
        let games = today.pane_games(pane);
        let focused = pane == today.pane;
        let color = if focused { Color::Yellow } else { Color::DarkGray };
        let mut block = default_border(color).title(format!(" {} ({}) ", pane.title(), games.len()));
        if pane == TodayPane::Live {
            block = block.title(Line::from(title.clone()).alignment(Alignment::Right));
        }
        let inner = block.inner(pane_area);
        f.render_widget(block, pane_area);

        if games.is_empty() {
            f.render_widget(
                Paragraph::new("No games").style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            continue;
        }
        let cursor = if focused { Some(today.cursor) } else { None };
        draw_game_list(f, inner, games, cursor, false);
    }
}

fn draw_yesterday(f: &mut Frame, area: Rect, app: &App) {
    let yesterday = &app.state.yesterday;
    let title = match yesterday.list().first() {
        Some(first) => format!(" Yesterday · {} ", first.date.format("%a %b %-d")),
        None => " Yesterday ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if yesterday.games.is_none() {
        draw_waiting(f, inner, app, "yesterday's games");
        return;
    }
    if yesterday.list().is_empty() {
        f.render_widget(
            Paragraph::new("No regular season games yesterday")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }
    draw_game_list(f, inner, yesterday.list(), Some(yesterday.cursor), false);
}

fn draw_team(f: &mut Frame, area: Rect, app: &App) {
    let Some(report) = app.state.team.report.as_ref() else {
        let block = default_border(Color::White).title(format!(" {} ", app.settings.team));
        let inner = block.inner(area);
        f.render_widget(block, area);
        draw_waiting(f, inner, app, "team season");
        return;
    };

    let schedule = &report.schedule;
    let season = schedule
        .season
        .first()
        .map(|g| g.date.year().to_string())
        .unwrap_or_default();
    let title = format!(" {} {season} ", report.team.name);
    let counts = format!(
        "{} played · {} remaining · {} live · {} total",
        schedule.played.len(),
        schedule.remaining.len(),
        schedule.live.len(),
        schedule.total()
    );

    let [season_area, roster_area] = if area.width >= 100 {
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(area)
    } else {
        Layout::vertical([Constraint::Fill(2), Constraint::Fill(1)]).areas(area)
    };

    let block = default_border(Color::White).title(title);
    let inner = block.inner(season_area);
    f.render_widget(block, season_area);
    let [counts_area, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(counts).style(Style::default().fg(Color::Gray)), counts_area);
    if schedule.season.is_empty() {
        f.render_widget(
            Paragraph::new("No regular season games scheduled").style(Style::default().fg(Color::DarkGray)),
            list_area,
        );
    } else {
        draw_game_list(f, list_area, &schedule.season, Some(app.state.team.cursor), true);
    }

    let block = default_border(Color::DarkGray).title(format!(" Roster ({}) ", report.roster.len()));
    let inner = block.inner(roster_area);
    f.render_widget(block, roster_area);
    let lines: Vec<Line> = report
        .roster
        .iter()
        .map(|p| {
            let jersey = p.jersey_number.as_deref().unwrap_or("-");
            let mut spans = vec![
                Span::styled(format!("{jersey:>3} "), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<3} ", p.position), Style::default().fg(Color::Gray)),
                Span::raw(p.name.clone()),
            ];
            if let Some(status) = p.status.as_deref().filter(|s| *s != "Active") {
                spans.push(Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray)));
            }
            Line::from(spans)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_game_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Game Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(game) = app.state.game_detail.game.as_ref() else {
        f.render_widget(
            Paragraph::new("Select a game on Today, Yesterday or Team and press Enter")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [header_area, _, linescore_area, footer_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let mut header = vec![
        Line::from(Span::styled(game.matchup(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!(
            "{}  {} ET{}",
            game.date.format("%A %B %-d, %Y"),
            game.start_time,
            if game.game_number > 1 { format!("  Game {}", game.game_number) } else { String::new() }
        )),
        Line::from(format!(
            "{} ({})  @  {} ({})",
            game.away_team, game.away_record, game.home_team, game.home_record
        )),
    ];
    if let Some(venue) = game.venue.as_deref() {
        header.push(Line::from(Span::styled(venue.to_string(), Style::default().fg(Color::DarkGray))));
    }
    f.render_widget(Paragraph::new(header), header_area);

    f.render_widget(LinescoreView { game }, linescore_area);

    if let Some(ls) = game.linescore.as_ref() {
        let footer = format!(
            "LOB  {} {}  ·  {} {}",
            game.away_team, ls.away.left_on_base, game.home_team, ls.home.left_on_base
        );
        f.render_widget(Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)), footer_area);
    }
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logs, area);
}

/// Render a scrolling list of games. `cursor` marks the selected row;
/// `dated` prefixes each row with its calendar date.
fn draw_game_list(f: &mut Frame, area: Rect, games: &[GameRecord], cursor: Option<Cursor>, dated: bool) {
    let height = area.height as usize;
    let offset = cursor.map(|c| c.scroll_offset(height)).unwrap_or(0);
    let width = area.width.saturating_sub(2) as usize;

    let lines: Vec<Line> = games
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(idx, game)| {
            let selected = cursor.is_some_and(|c| c.selected == idx);
            let marker = if selected { "> " } else { "  " };
            let text = if dated {
                format!("{}  {}", game.date.format("%a %m/%d"), game_row(game))
            } else {
                game_row(game)
            };
            let clipped: String = text.chars().take(width).collect();
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                row_style(game)
            };
            Line::from(vec![Span::raw(marker), Span::styled(clipped, style)])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn row_style(game: &GameRecord) -> Style {
    match game.state {
        GameState::Live => Style::default().fg(Color::Green),
        GameState::Final => Style::default().fg(Color::White),
        GameState::Preview => Style::default().fg(Color::Gray),
    }
}

/// One-line summary: records before first pitch, scores after.
fn game_row(game: &GameRecord) -> String {
    let (away, home) = match (game.away_score, game.home_score) {
        (Some(a), Some(h)) => (format!("{} {a}", game.away_team), format!("{} {h}", game.home_team)),
        _ => (
            format!("{} ({})", game.away_team, game.away_record),
            format!("{} ({})", game.home_team, game.home_record),
        ),
    };
    let status = match (game.state, game.linescore.as_ref()) {
        (GameState::Preview, _) => format!("{} ET", game.start_time),
        (_, Some(ls)) => status_line(game, ls),
        (_, None) => game.detailed_state.clone(),
    };
    let slot = if game.game_number > 1 { format!(" G{}", game.game_number) } else { String::new() };
    format!("{away} @ {home}  [{status}]{slot}")
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
