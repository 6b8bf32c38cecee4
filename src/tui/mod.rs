pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::query::{SortField, View};

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_tui(mut app: App, refresh_interval: Option<Duration>) -> anyhow::Result<()> {
    // Hold log lines while the TUI owns the terminal
    crate::logging::activate();

    // Sets up panic hooks that restore the terminal
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(TICK_RATE, refresh_interval);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
            Event::Refresh => {
                // Don't yank the view from under an open search or help popup
                if app.input_mode == app::InputMode::Normal {
                    app.needs_refresh = true;
                }
            }
        }

        if app.needs_refresh {
            app.reload();
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    for line in crate::logging::drain() {
        eprint!("{}", line);
    }

    result
}

fn sort_field_for_key(c: char) -> Option<SortField> {
    match c {
        '1' | 'c' => Some(SortField::Composite),
        '2' | 'b' => Some(SortField::Baseline),
        '3' | 'g' => Some(SortField::Gbm),
        '4' | 'l' => Some(SortField::Logistic),
        '5' | 'd' => Some(SortField::Change),
        _ => None,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => match (app.session.view, key.code) {
            (_, KeyCode::Char('q')) => app.should_quit = true,
            (_, KeyCode::Char('?')) => app.show_help(),
            (_, KeyCode::Char('r')) => {
                app.needs_refresh = true;
                app.show_flash("Reloading...".to_string());
            }

            (View::Detail, KeyCode::Esc | KeyCode::Backspace) => app.back_to_watchlist(),

            (View::Watchlist, KeyCode::Char('j') | KeyCode::Down) => app.next_row(),
            (View::Watchlist, KeyCode::Char('k') | KeyCode::Up) => app.previous_row(),
            (View::Watchlist, KeyCode::Enter) => app.open_detail(),
            (View::Watchlist, KeyCode::Char('/')) => app.start_search_input(),
            (View::Watchlist, KeyCode::Char('f')) => app.cycle_sector(),
            (View::Watchlist, KeyCode::Char(c)) => {
                if let Some(field) = sort_field_for_key(c) {
                    app.select_sort_field(field);
                }
            }

            _ => {}
        },
        app::InputMode::SearchInput => match key.code {
            KeyCode::Enter => app.confirm_search_input(),
            KeyCode::Esc => app.cancel_search_input(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) => app.push_search_char(c),
            // Everything else stays in the input
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fetch_collection;
    use crate::query::{QuerySession, SortDirection};
    use crate::signals::SyntheticSignals;
    use crate::source::SyntheticSource;

    fn app() -> App {
        let source = SyntheticSource::new(Some(5));
        let collection = fetch_collection(&source).unwrap();
        App::new(
            collection,
            QuerySession::default(),
            Box::new(source),
            Box::new(SyntheticSignals::new(5)),
            ThemeColors::dark(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_sort_keys_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.session.sort.direction, SortDirection::Ascending);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.session.sort.direction, SortDirection::Descending);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.session.sort.field, SortField::Change);
        assert_eq!(app.session.sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_search_mode_captures_sort_letters() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.session.search, "cq");
        assert_eq!(app.session.sort.field, SortField::Composite);
        assert_eq!(app.session.sort.direction, SortDirection::Descending);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, app::InputMode::Normal);
    }

    #[test]
    fn test_enter_and_escape() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.view, View::Detail);
        // Navigation keys do nothing in the detail view
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.table_state.selected(), Some(0));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session.view, View::Watchlist);
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, app::InputMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_search() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
