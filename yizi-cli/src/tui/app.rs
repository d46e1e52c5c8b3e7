//! Core application state for the lookup TUI

use yizi_core::radicals::{self, RadicalEntry};
use yizi_core::{CharacterRecord, PendingQuery, QueryError, SearchController, SearchMode};

/// Records skipped per PageUp / PageDown
pub const RESULTS_PAGE: usize = 3;

/// Main application state
///
/// Search state lives in the controller; this struct only adds what the
/// terminal needs on top of it (input buffer, list cursor, overlays).
pub struct App<S> {
    /// Owner of mode, criteria, results and errors
    pub controller: SearchController<S>,
    /// Text typed in character mode
    pub input: String,
    /// Cursor in the radical list (radical mode)
    pub radical_index: usize,
    /// Index of the first record shown in the results pane
    pub results_scroll: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
    /// Frame counter driving the loading spinner
    pub tick: usize,
}

impl<S> App<S> {
    pub fn new(store: S) -> Self {
        Self {
            controller: SearchController::new(store),
            input: String::new(),
            radical_index: 0,
            results_scroll: 0,
            show_help: false,
            status_message: None,
            tick: 0,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.controller.mode()
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Switch to `mode`, dropping typed text and list position
    pub fn switch_mode(&mut self, mode: SearchMode) {
        if mode == self.mode() {
            return;
        }
        self.controller.set_mode(mode);
        self.input.clear();
        self.radical_index = 0;
        self.results_scroll = 0;
        self.set_status(format!("查詢方式：{}", mode.display_name()));
    }

    pub fn toggle_mode(&mut self) {
        self.switch_mode(self.mode().toggle());
    }

    /// Type a character; returns the query to run for the new input
    pub fn input_char(&mut self, c: char) -> Option<PendingQuery> {
        self.input.push(c);
        self.controller.begin_text_search(&self.input)
    }

    /// Delete the last character; returns the query to run, if any
    pub fn input_backspace(&mut self) -> Option<PendingQuery> {
        self.input.pop()?;
        self.controller.begin_text_search(&self.input)
    }

    /// Move to the next stroke count (wraps)
    pub fn stroke_next(&mut self) {
        self.step_stroke_count(1);
    }

    /// Move to the previous stroke count (wraps)
    pub fn stroke_prev(&mut self) {
        self.step_stroke_count(-1);
    }

    fn step_stroke_count(&mut self, delta: isize) {
        let counts = radicals::stroke_counts();
        if counts.is_empty() {
            return;
        }
        let next = match self
            .controller
            .state()
            .stroke_count
            .and_then(|current| counts.iter().position(|&c| c == current))
        {
            Some(idx) => (idx as isize + delta).rem_euclid(counts.len() as isize) as usize,
            None if delta < 0 => counts.len() - 1,
            None => 0,
        };
        self.controller.select_stroke_count(counts[next]);
        self.radical_index = 0;
    }

    pub fn offered_radicals(&self) -> Vec<RadicalEntry> {
        self.controller.offered_radicals()
    }

    /// Select next radical in the list
    pub fn radical_next(&mut self) {
        let len = self.offered_radicals().len();
        if len > 0 {
            self.radical_index = (self.radical_index + 1).min(len - 1);
        }
    }

    /// Select previous radical in the list
    pub fn radical_prev(&mut self) {
        self.radical_index = self.radical_index.saturating_sub(1);
    }

    pub fn highlighted_radical(&self) -> Option<RadicalEntry> {
        self.offered_radicals().get(self.radical_index).copied()
    }

    /// Search by the highlighted radical
    pub fn confirm_radical(&mut self) -> Option<PendingQuery> {
        let entry = self.highlighted_radical()?;
        Some(self.controller.begin_radical_search(entry))
    }

    /// Apply a finished query; stale outcomes are ignored
    pub fn complete(&mut self, seq: u64, outcome: Result<Vec<CharacterRecord>, QueryError>) {
        let count = outcome.as_ref().map(Vec::len).ok();
        if self.controller.complete(seq, outcome) {
            self.results_scroll = 0;
            if let Some(count) = count {
                self.set_status(format!("{} 筆結果", count.min(yizi_core::RESULT_LIMIT)));
            }
        }
    }

    /// Scroll the results pane down by `records`, stopping at the last record
    pub fn scroll_results_down(&mut self, records: usize) {
        let last = self.controller.state().results.len().saturating_sub(1);
        self.results_scroll = (self.results_scroll + records).min(last);
    }

    pub fn scroll_results_up(&mut self, records: usize) {
        self.results_scroll = self.results_scroll.saturating_sub(records);
    }

    pub fn show_help(&mut self) {
        self.show_help = true;
    }

    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yizi_core::{CharacterQuery, SearchView};

    fn record(glyph: &str) -> CharacterRecord {
        CharacterRecord {
            id: 1,
            chapter: 1,
            serial: 1,
            glyph: glyph.to_string(),
            radical_number: None,
            video_url: String::new(),
        }
    }

    #[test]
    fn test_typing_dispatches_whole_input() {
        let mut app = App::new(());
        app.input_char('永');
        let pending = app.input_char('和').unwrap();
        assert_eq!(pending.query, CharacterQuery::glyph_contains("永和"));
        assert_eq!(app.controller.state().query_text, "永和");
    }

    #[test]
    fn test_backspace_to_empty_clears() {
        let mut app = App::new(());
        let pending = app.input_char('永').unwrap();
        app.complete(pending.seq, Ok(vec![record("永")]));
        assert!(app.input_backspace().is_none());
        assert!(app.controller.state().results.is_empty());
        assert_eq!(app.controller.view(), SearchView::Idle);
        // nothing left to delete
        assert!(app.input_backspace().is_none());
    }

    #[test]
    fn test_stroke_count_wraps() {
        let mut app = App::new(());
        app.switch_mode(SearchMode::Radical);
        app.stroke_next();
        assert_eq!(app.controller.state().stroke_count, Some(1));
        app.stroke_prev();
        assert_eq!(app.controller.state().stroke_count, Some(17));
        app.stroke_next();
        assert_eq!(app.controller.state().stroke_count, Some(1));
    }

    #[test]
    fn test_confirm_radical_queries_by_number() {
        let mut app = App::new(());
        app.switch_mode(SearchMode::Radical);
        assert!(app.confirm_radical().is_none());

        for _ in 0..4 {
            app.stroke_next();
        }
        assert_eq!(app.controller.state().stroke_count, Some(4));
        while app.highlighted_radical().map(|r| r.number) != Some(64) {
            app.radical_next();
        }
        let pending = app.confirm_radical().unwrap();
        assert_eq!(pending.query, CharacterQuery::radical_equals(64));
    }

    #[test]
    fn test_radical_cursor_stays_in_bounds() {
        let mut app = App::new(());
        app.switch_mode(SearchMode::Radical);
        app.stroke_prev(); // 17 strokes: a single radical
        app.radical_next();
        app.radical_next();
        assert_eq!(app.radical_index, 0);
        app.radical_prev();
        assert_eq!(app.radical_index, 0);
    }

    #[test]
    fn test_results_scroll_clamps_and_resets() {
        let mut app = App::new(());
        let pending = app.input_char('一').unwrap();
        let records = ["一", "丁", "七"].iter().map(|g| record(g)).collect();
        app.complete(pending.seq, Ok(records));

        app.scroll_results_down(RESULTS_PAGE);
        assert_eq!(app.results_scroll, 2);
        app.scroll_results_up(1);
        assert_eq!(app.results_scroll, 1);
        app.scroll_results_up(RESULTS_PAGE);
        assert_eq!(app.results_scroll, 0);

        app.scroll_results_down(1);
        let pending = app.input_char('丁').unwrap();
        app.complete(pending.seq, Ok(vec![record("丁")]));
        assert_eq!(app.results_scroll, 0);
    }

    #[test]
    fn test_toggle_mode_resets_input() {
        let mut app = App::new(());
        app.input_char('永');
        app.toggle_mode();
        assert_eq!(app.mode(), SearchMode::Radical);
        assert!(app.input.is_empty());
        assert!(app.controller.state().query_text.is_empty());
    }
}
