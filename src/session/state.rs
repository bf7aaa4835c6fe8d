//! Query state holder.

use crate::models::{BookDoc, SearchField, SearchQuery, SearchResult, UiState};
use crate::session::{FetchEvent, FetchOutcome, FetchTicket, Pager};

/// Holds the query, the last applied result and the view state.
///
/// Mutators return `true` when the query changed and a new fetch is needed.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: SearchQuery,
    result: SearchResult,
    ui: UiState,
    generation: u64,
    // Query of the ticket in flight and of the result on screen
    pending: Option<SearchQuery>,
    shown: Option<SearchQuery>,
}

impl SearchSession {
    pub fn new(field: SearchField) -> Self {
        Self {
            query: SearchQuery::default().field(field),
            ..Default::default()
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Paging bounds for the current query.
    ///
    /// Until a result for the current text and field arrives there are no
    /// pages to move to; another query's page count does not apply.
    pub fn pager(&self) -> Pager {
        let total_found = match &self.shown {
            Some(shown) if shown.text == self.query.text && shown.field == self.query.field => {
                self.result.total_found
            }
            _ => 0,
        };
        Pager::new(self.query.page, total_found)
    }

    /// The query moved away from the result on screen while nothing is loading,
    /// e.g. its page was clamped after the catalogue shrank
    pub fn needs_fetch(&self) -> bool {
        !self.ui.loading
            && !self.query.is_empty()
            && self.shown.as_ref().is_some_and(|shown| shown != &self.query)
    }

    pub fn total_pages(&self) -> u32 {
        self.pager().total_pages
    }

    /// Replace the search text; a different text starts again from page 1
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.query.text {
            return false;
        }
        self.query.text = text;
        self.query.page = 1;
        true
    }

    /// Replace the search field; a different field starts again from page 1
    pub fn set_field(&mut self, field: SearchField) -> bool {
        if field == self.query.field {
            return false;
        }
        self.query.field = field;
        self.query.page = 1;
        true
    }

    pub fn cycle_field(&mut self) -> bool {
        self.set_field(self.query.field.next())
    }

    pub fn next_page(&mut self) -> bool {
        let pager = self.pager();
        if !pager.has_next() {
            return false;
        }
        self.go_to_page(pager.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        let pager = self.pager();
        if !pager.has_prev() {
            return false;
        }
        self.go_to_page(pager.page - 1)
    }

    /// Jump to a page, clamped to the pages reported for the current query
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let page = self.pager().clamp(page);
        if page == self.query.page {
            return false;
        }
        self.query.page = page;
        true
    }

    /// Open the detail panel for the record at `index` on the current page
    pub fn select(&mut self, index: usize) -> Option<&BookDoc> {
        let doc = self.result.documents.get(index)?.clone();
        self.ui.selected = Some(doc);
        self.ui.selected.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.ui.selected = None;
    }

    /// Start a fetch for the current query.
    ///
    /// Every call supersedes earlier tickets. An empty query issues nothing
    /// and clears the results.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        self.generation += 1;

        if self.query.is_empty() {
            self.result = SearchResult::empty();
            self.ui.loading = false;
            self.ui.error = None;
            self.pending = None;
            self.shown = None;
            return None;
        }

        self.pending = Some(self.query.clone());
        self.ui.loading = true;
        self.ui.error = None;
        Some(FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Apply a fetch outcome; events from superseded tickets are dropped.
    ///
    /// Returns whether the state changed.
    pub fn apply(&mut self, event: FetchEvent) -> bool {
        if event.generation != self.generation {
            tracing::trace!(
                generation = event.generation,
                current = self.generation,
                "dropping stale search result"
            );
            return false;
        }

        match event.outcome {
            FetchOutcome::Success(result) => {
                self.result = result;
                self.shown = self.pending.take();
                self.ui.error = None;
                // The reported total may have shrunk below the requested page
                let page = self.pager().clamp(self.query.page);
                self.query.page = page;
            }
            FetchOutcome::Failure(message) => {
                self.result = SearchResult::empty();
                self.shown = None;
                self.pending = None;
                self.ui.error = Some(message);
            }
            FetchOutcome::Cancelled => self.pending = None,
        }
        self.ui.loading = false;
        true
    }
}
