//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use yizi_core::{PendingQuery, SearchMode};

use super::app::{App, RESULTS_PAGE};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Run a query in the background
    Dispatch(PendingQuery),
}

impl From<Option<PendingQuery>> for HandleResult {
    fn from(pending: Option<PendingQuery>) -> Self {
        pending.map_or(HandleResult::Continue, HandleResult::Dispatch)
    }
}

/// Handle a key event
pub fn handle_key<S>(app: &mut App<S>, key: KeyEvent) -> HandleResult {
    if key.kind == KeyEventKind::Release {
        return HandleResult::Continue;
    }

    // Global quit shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return HandleResult::Quit;
    }

    if app.show_help {
        app.dismiss_help();
        return HandleResult::Continue;
    }

    match key.code {
        KeyCode::Esc => return HandleResult::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.show_help();
            return HandleResult::Continue;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_mode();
            return HandleResult::Continue;
        }

        // Results pane, both modes
        KeyCode::PageDown => {
            app.scroll_results_down(RESULTS_PAGE);
            return HandleResult::Continue;
        }
        KeyCode::PageUp => {
            app.scroll_results_up(RESULTS_PAGE);
            return HandleResult::Continue;
        }
        KeyCode::Down if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_results_down(1);
            return HandleResult::Continue;
        }
        KeyCode::Up if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_results_up(1);
            return HandleResult::Continue;
        }
        _ => {}
    }

    match app.mode() {
        SearchMode::Character => handle_character_mode(app, key),
        SearchMode::Radical => handle_radical_mode(app, key),
    }
}

/// Typing goes straight into the search input
fn handle_character_mode<S>(app: &mut App<S>, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Backspace => app.input_backspace().into(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_char(c).into()
        }
        _ => HandleResult::Continue,
    }
}

fn handle_radical_mode<S>(app: &mut App<S>, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => HandleResult::Quit,
        KeyCode::Char('1') => {
            app.switch_mode(SearchMode::Character);
            HandleResult::Continue
        }

        // Stroke count row
        KeyCode::Left | KeyCode::Char('h') => {
            app.stroke_prev();
            HandleResult::Continue
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.stroke_next();
            HandleResult::Continue
        }

        // Radical list
        KeyCode::Down | KeyCode::Char('j') => {
            app.radical_next();
            HandleResult::Continue
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.radical_prev();
            HandleResult::Continue
        }
        KeyCode::Enter => app.confirm_radical().into(),

        _ => HandleResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yizi_core::CharacterQuery;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_dispatches_query() {
        let mut app = App::new(());
        match handle_key(&mut app, press(KeyCode::Char('永'))) {
            HandleResult::Dispatch(pending) => {
                assert_eq!(pending.query, CharacterQuery::glyph_contains("永"))
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(());
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), HandleResult::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_c), HandleResult::Quit);
    }

    #[test]
    fn test_tab_toggles_mode() {
        let mut app = App::new(());
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.mode(), SearchMode::Radical);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.mode(), SearchMode::Character);
    }

    #[test]
    fn test_radical_mode_flow() {
        let mut app = App::new(());
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), HandleResult::Continue);

        handle_key(&mut app, press(KeyCode::Right));
        assert_eq!(app.controller.state().stroke_count, Some(1));
        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.radical_index, 1);

        match handle_key(&mut app, press(KeyCode::Enter)) {
            HandleResult::Dispatch(pending) => {
                assert_eq!(pending.query, CharacterQuery::radical_equals(2))
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
    }

    fn ten_records() -> Vec<yizi_core::CharacterRecord> {
        (1..=10)
            .map(|n| yizi_core::CharacterRecord {
                id: n,
                chapter: 1,
                serial: n as i32,
                glyph: "永".to_string(),
                radical_number: Some(85),
                video_url: String::new(),
            })
            .collect()
    }

    fn dispatched(result: HandleResult) -> PendingQuery {
        match result {
            HandleResult::Dispatch(pending) => pending,
            other => panic!("expected dispatch, got {:?}", other),
        }
    }

    #[test]
    fn test_page_keys_scroll_results() {
        let mut app = App::new(());
        let pending = dispatched(handle_key(&mut app, press(KeyCode::Char('永'))));
        app.complete(pending.seq, Ok(ten_records()));

        handle_key(&mut app, press(KeyCode::PageDown));
        assert_eq!(app.results_scroll, RESULTS_PAGE);
        let ctrl_down = KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL);
        handle_key(&mut app, ctrl_down);
        assert_eq!(app.results_scroll, RESULTS_PAGE + 1);
        handle_key(&mut app, press(KeyCode::PageUp));
        assert_eq!(app.results_scroll, 1);
        // typing still goes to the input, not the pane
        assert_eq!(app.input, "永");
    }

    #[test]
    fn test_page_keys_leave_radical_cursor_alone() {
        let mut app = App::new(());
        handle_key(&mut app, press(KeyCode::Tab));
        handle_key(&mut app, press(KeyCode::Right));
        let pending = dispatched(handle_key(&mut app, press(KeyCode::Enter)));
        app.complete(pending.seq, Ok(ten_records()));

        handle_key(&mut app, press(KeyCode::PageDown));
        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.results_scroll, RESULTS_PAGE);
        assert_eq!(app.radical_index, 1);
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let mut app = App::new(());
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), HandleResult::Continue);
        assert!(!app.show_help);
    }
}
