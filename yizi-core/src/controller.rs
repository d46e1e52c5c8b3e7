//! Search controller: the single owner of lookup state
//!
//! Two input modes feed one result list:
//! - character mode: free-text substring search on the glyph
//! - radical mode: pick a stroke count, then a radical, then query by radical number
//!
//! Every dispatched query gets a sequence number. Only the completion whose
//! number matches the latest in-flight request is applied; anything older is
//! dropped, so a slow response can never overwrite newer state.

use tracing::{debug, warn};

use crate::error::QueryError;
use crate::model::CharacterRecord;
use crate::query::{CharacterQuery, CharacterStore, RESULT_LIMIT};
use crate::radicals::{self, RadicalEntry};

/// Which input drives the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Type a character, substring match on the glyph
    #[default]
    Character,
    /// Browse radicals by stroke count
    Radical,
}

impl SearchMode {
    /// Label used by the front-ends
    pub fn display_name(&self) -> &'static str {
        match self {
            SearchMode::Character => "字",
            SearchMode::Radical => "部首",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            SearchMode::Character => SearchMode::Radical,
            SearchMode::Radical => SearchMode::Character,
        }
    }
}

/// Everything the front-ends observe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub mode: SearchMode,
    pub query_text: String,
    pub stroke_count: Option<u8>,
    pub selected_radical: Option<RadicalEntry>,
    pub results: Vec<CharacterRecord>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// A dispatched query waiting for its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub seq: u64,
    pub query: CharacterQuery,
}

/// Read-only projection of [`SearchState`] for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    /// Nothing asked yet
    Idle,
    Loading,
    /// A query failed; results are empty
    Error(&'a str),
    /// Criteria were given but nothing matched
    NoMatches,
    Results(&'a [CharacterRecord]),
}

pub struct SearchController<S> {
    store: S,
    state: SearchState,
    next_seq: u64,
    in_flight: Option<u64>,
}

impl<S> SearchController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SearchState::default(),
            next_seq: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn mode(&self) -> SearchMode {
        self.state.mode
    }

    /// Sequence number of the request whose outcome would be applied next
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Switch input mode, resetting all query state. Selecting the current
    /// mode again changes nothing.
    pub fn set_mode(&mut self, mode: SearchMode) {
        if mode == self.state.mode {
            return;
        }
        debug!(from = ?self.state.mode, to = ?mode, "switching search mode");
        self.invalidate();
        self.state = SearchState {
            mode,
            ..SearchState::default()
        };
    }

    /// Record new search text and dispatch a glyph query for it.
    ///
    /// Empty text clears the results and dispatches nothing.
    pub fn begin_text_search(&mut self, text: &str) -> Option<PendingQuery> {
        self.state.query_text = text.to_string();
        if text.is_empty() {
            self.invalidate();
            self.state.results.clear();
            self.state.error_message = None;
            return None;
        }
        Some(self.dispatch(CharacterQuery::glyph_contains(text)))
    }

    /// Narrow the offered radicals. Issues no query.
    pub fn select_stroke_count(&mut self, count: u8) {
        self.invalidate();
        self.state.stroke_count = Some(count);
        self.state.selected_radical = None;
        self.state.results.clear();
        self.state.error_message = None;
    }

    /// Radicals offered for the current stroke count, in table order
    pub fn offered_radicals(&self) -> Vec<RadicalEntry> {
        self.state
            .stroke_count
            .map(radicals::by_stroke_count)
            .unwrap_or_default()
    }

    /// Select a radical and dispatch an exact-match query for its number
    pub fn begin_radical_search(&mut self, entry: RadicalEntry) -> PendingQuery {
        self.state.selected_radical = Some(entry);
        self.dispatch(CharacterQuery::radical_equals(entry.number))
    }

    /// Apply the outcome of request `seq`.
    ///
    /// Returns false when the request is no longer the latest one and the
    /// outcome was dropped.
    pub fn complete(&mut self, seq: u64, outcome: Result<Vec<CharacterRecord>, QueryError>) -> bool {
        if self.in_flight != Some(seq) {
            debug!(seq, latest = ?self.in_flight, "discarding stale query outcome");
            return false;
        }
        self.in_flight = None;
        self.state.is_loading = false;

        match outcome {
            Ok(mut records) => {
                records.truncate(RESULT_LIMIT);
                debug!(seq, count = records.len(), "query completed");
                self.state.results = records;
                self.state.error_message = None;
            }
            Err(err) => {
                warn!(seq, error = %err, "query failed");
                self.state.results.clear();
                self.state.error_message = Some(err.user_message());
            }
        }
        true
    }

    /// What the front-ends should show right now
    pub fn view(&self) -> SearchView<'_> {
        let state = &self.state;
        if state.is_loading {
            return SearchView::Loading;
        }
        if let Some(message) = &state.error_message {
            return SearchView::Error(message.as_str());
        }
        if !state.results.is_empty() {
            return SearchView::Results(&state.results);
        }
        let has_criteria = match state.mode {
            SearchMode::Character => !state.query_text.is_empty(),
            SearchMode::Radical => state.selected_radical.is_some(),
        };
        if has_criteria {
            SearchView::NoMatches
        } else {
            SearchView::Idle
        }
    }

    fn dispatch(&mut self, query: CharacterQuery) -> PendingQuery {
        self.next_seq += 1;
        let seq = self.next_seq;
        if let Some(previous) = self.in_flight.replace(seq) {
            debug!(previous, seq, "superseding in-flight query");
        }
        self.state.is_loading = true;
        self.state.error_message = None;
        debug!(seq, %query, "dispatching query");
        PendingQuery { seq, query }
    }

    fn invalidate(&mut self) {
        self.in_flight = None;
        self.state.is_loading = false;
    }
}

impl<S: CharacterStore> SearchController<S> {
    /// Search by text and wait for the outcome
    pub async fn search_by_text(&mut self, text: &str) {
        if let Some(pending) = self.begin_text_search(text) {
            self.run(pending).await;
        }
    }

    /// Select a radical and wait for the outcome
    pub async fn select_radical(&mut self, entry: RadicalEntry) {
        let pending = self.begin_radical_search(entry);
        self.run(pending).await;
    }

    async fn run(&mut self, pending: PendingQuery) {
        let outcome = self.store.fetch(&pending.query).await;
        self.complete(pending.seq, outcome);
    }
}
