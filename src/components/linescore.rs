use mlb_api::{GameRecord, GameState, Linescore, LineTotals};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

const NAME_W: usize = 16;
const INNING_W: usize = 3;

/// Inning-by-inning grid for a single game:
///
/// ```text
///                    1  2  3  4  5  6  7  8  9     R  H  E
/// Baltimore Orio     0  0  0  0  0  0  0  0  4     4  9  1
/// Boston Red Sox     6  0  0  0  0  0  0  0  x     6  9  0
///
/// Final
/// ```
pub struct LinescoreView<'a> {
    pub game: &'a GameRecord,
}

impl Widget for LinescoreView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height == 0 {
            return;
        }
        let dim = Style::default().fg(Color::DarkGray);
        let width = area.width as usize;

        let Some(linescore) = self.game.linescore.as_ref() else {
            let msg = match self.game.state {
                GameState::Preview => format!("First pitch {} ET", self.game.start_time),
                _ => "Linescore unavailable".to_string(),
            };
            buf.set_string(area.x, area.y, clip(&msg, width), dim);
            return;
        };

        let final_game = self.game.state == GameState::Final;
        let (away_style, home_style) = team_styles(self.game, final_game);
        let rows = [
            (header_row(linescore), dim),
            (team_row(&self.game.away_team, linescore, Side::Away, final_game), away_style),
            (team_row(&self.game.home_team, linescore, Side::Home, final_game), home_style),
        ];
        for (dy, (text, style)) in rows.iter().enumerate() {
            if dy as u16 >= area.height {
                return;
            }
            buf.set_string(area.x, area.y + dy as u16, clip(text, width), *style);
        }

        if let Some(col) = current_inning_column(self.game, linescore)
            && col < width
        {
            let x = area.x + col as u16;
            for dy in 0..area.height.min(3) {
                if let Some(cell) = buf.cell_mut((x, area.y + dy)) {
                    cell.set_fg(Color::Yellow);
                }
            }
        }

        if area.height >= 5 {
            buf.set_string(area.x, area.y + 4, clip(&status_line(self.game, linescore), width), dim);
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Away,
    Home,
}

fn columns(linescore: &Linescore) -> u8 {
    let played = linescore.innings.iter().map(|i| i.number).max().unwrap_or(0);
    played.max(linescore.scheduled_innings)
}

fn header_row(linescore: &Linescore) -> String {
    let mut row = " ".repeat(NAME_W);
    for n in 1..=columns(linescore) {
        row.push_str(&format!("{:>INNING_W$}", n % 100));
    }
    row.push_str("   ");
    for label in ["R", "H", "E"] {
        row.push_str(&format!("{label:>INNING_W$}"));
    }
    row
}

fn team_row(name: &str, linescore: &Linescore, side: Side, final_game: bool) -> String {
    let mut row = format!("{:<NAME_W$}", clip(name, NAME_W - 2));
    let last = columns(linescore);
    for n in 1..=last {
        let inning = linescore.innings.iter().find(|i| i.number == n);
        let runs = inning.and_then(|i| match side {
            Side::Away => i.away_runs,
            Side::Home => i.home_runs,
        });
        let cell = match runs {
            Some(r) => r.to_string(),
            // home side skipped the bottom of the last inning
            None if final_game && inning.is_some() && n == last => "x".to_string(),
            None => String::new(),
        };
        row.push_str(&format!("{cell:>INNING_W$}"));
    }
    let totals: &LineTotals = match side {
        Side::Away => &linescore.away,
        Side::Home => &linescore.home,
    };
    row.push_str("   ");
    for value in [totals.runs, totals.hits, totals.errors] {
        row.push_str(&format!("{value:>INNING_W$}"));
    }
    row
}

/// Column (relative to the widget's left edge) of the inning being played.
fn current_inning_column(game: &GameRecord, linescore: &Linescore) -> Option<usize> {
    if game.state != GameState::Live {
        return None;
    }
    let inning = linescore.current_inning? as usize;
    if inning == 0 || inning > columns(linescore) as usize {
        return None;
    }
    Some(NAME_W + inning * INNING_W - 1)
}

fn team_styles(game: &GameRecord, final_game: bool) -> (Style, Style) {
    let base = Style::default().fg(Color::White);
    let winner = base.add_modifier(Modifier::BOLD);
    match (final_game, game.away_score, game.home_score) {
        (true, Some(a), Some(h)) if a > h => (winner, base),
        (true, Some(a), Some(h)) if h > a => (base, winner),
        _ => (base, base),
    }
}

pub fn status_line(game: &GameRecord, linescore: &Linescore) -> String {
    match game.state {
        GameState::Live => match (linescore.inning_state.as_deref(), linescore.current_inning) {
            (Some(half), Some(n)) => format!("{half} {}", ordinal(n)),
            _ => game.detailed_state.clone(),
        },
        GameState::Final => {
            let played = columns(linescore);
            if played > linescore.scheduled_innings {
                format!("Final/{played}")
            } else {
                game.detailed_state.clone()
            }
        }
        GameState::Preview => game.detailed_state.clone(),
    }
}

pub fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mlb_api::Inning;

    fn linescore(innings: &[(Option<u16>, Option<u16>)]) -> Linescore {
        Linescore {
            current_inning: Some(innings.len() as u8),
            inning_state: Some("Top".into()),
            scheduled_innings: 9,
            innings: innings
                .iter()
                .enumerate()
                .map(|(i, (away, home))| Inning {
                    number: i as u8 + 1,
                    away_runs: *away,
                    home_runs: *home,
                })
                .collect(),
            away: LineTotals { runs: 4, hits: 9, errors: 1, left_on_base: 8 },
            home: LineTotals { runs: 6, hits: 9, errors: 0, left_on_base: 5 },
        }
    }

    fn record(state: GameState, linescore: Option<Linescore>) -> GameRecord {
        GameRecord {
            game_id: 565_000,
            date: NaiveDate::from_ymd_opt(2019, 7, 4).unwrap(),
            start_time: "1:05".into(),
            home_team: "Boston Red Sox".into(),
            away_team: "Baltimore Orioles".into(),
            home_score: state.has_started().then_some(6),
            away_score: state.has_started().then_some(4),
            home_record: "84-78".into(),
            away_record: "54-108".into(),
            state,
            detailed_state: state.label().into(),
            linescore,
            venue: Some("Fenway Park".into()),
            game_number: 1,
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect::<String>()
    }

    #[test]
    fn test_header_has_scheduled_innings_and_totals() {
        let header = header_row(&linescore(&[(Some(0), Some(6))]));
        assert_eq!(header.trim(), "1  2  3  4  5  6  7  8  9     R  H  E");
    }

    #[test]
    fn test_extra_innings_widen_grid() {
        let ls = linescore(&[(Some(0), Some(0)); 11]);
        assert_eq!(columns(&ls), 11);
        assert!(header_row(&ls).contains(" 10 11"));
    }

    #[test]
    fn test_team_rows_align_with_header() {
        let mut innings = vec![(Some(0), Some(0)); 9];
        innings[0].1 = Some(6);
        innings[8] = (Some(4), None);
        let ls = linescore(&innings);
        let header = header_row(&ls);
        let away = team_row("Baltimore Orioles", &ls, Side::Away, true);
        let home = team_row("Boston Red Sox", &ls, Side::Home, true);
        assert_eq!(away.chars().count(), header.chars().count());
        assert_eq!(home.chars().count(), header.chars().count());
        assert!(away.starts_with("Baltimore Orio  "));
        assert!(away.ends_with("  4     4  9  1"), "row: {away:?}");
        assert!(home.ends_with("  x     6  9  0"), "row: {home:?}");
    }

    #[test]
    fn test_unplayed_innings_are_blank_while_live() {
        let ls = linescore(&[(Some(1), Some(0)), (Some(0), None)]);
        let home = team_row("Boston Red Sox", &ls, Side::Home, false);
        let grid = &home[NAME_W..NAME_W + 9 * INNING_W];
        assert_eq!(grid.trim(), "0");
        assert!(!grid.contains('x'));
    }

    #[test]
    fn test_status_line() {
        let mut ls = linescore(&[(Some(0), Some(0)); 7]);
        ls.inning_state = Some("Bottom".into());
        assert_eq!(status_line(&record(GameState::Live, None), &ls), "Bottom 7th");

        let extras = linescore(&[(Some(0), Some(0)); 12]);
        assert_eq!(status_line(&record(GameState::Final, None), &extras), "Final/12");
    }

    #[test]
    fn test_ordinals() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22].into_iter().map(ordinal).collect();
        assert_eq!(got, ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd"]);
    }

    #[test]
    fn test_render_grid_into_buffer() {
        let mut innings = vec![(Some(0), Some(0)); 9];
        innings[0].1 = Some(6);
        innings[8] = (Some(4), None);
        let game = record(GameState::Final, Some(linescore(&innings)));
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        LinescoreView { game: &game }.render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("1  2  3"));
        assert!(row_text(&buf, 1).starts_with("Baltimore Orio"));
        assert!(row_text(&buf, 2).starts_with("Boston Red Sox"));
        assert_eq!(row_text(&buf, 4).trim(), "Final");
        assert!(buf[(0, 2)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_render_preview_without_linescore() {
        let game = record(GameState::Preview, None);
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        LinescoreView { game: &game }.render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "First pitch 1:05 ET");
    }
}
