//! Wires the session to the fetcher.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::models::{BookDoc, SearchField};
use crate::session::{FetchEvent, FetchOutcome, Fetcher, SearchSession};
use crate::sources::BookSource;

/// Drives a [`SearchSession`]: every query change schedules a fetch, and
/// results are applied as they arrive.
#[derive(Debug)]
pub struct SearchController {
    session: SearchSession,
    fetcher: Fetcher,
    events: mpsc::UnboundedReceiver<FetchEvent>,
}

impl SearchController {
    /// Create a controller on the current tokio runtime
    pub fn new(source: Arc<dyn BookSource>, field: SearchField, debounce: Duration) -> Self {
        let (fetcher, events) = Fetcher::new(source, debounce);
        Self {
            session: SearchSession::new(field),
            fetcher,
            events,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.session.set_text(text) {
            self.refresh();
        }
    }

    pub fn cycle_field(&mut self) {
        if self.session.cycle_field() {
            self.refresh();
        }
    }

    pub fn next_page(&mut self) {
        if self.session.next_page() {
            self.refresh();
        }
    }

    pub fn prev_page(&mut self) {
        if self.session.prev_page() {
            self.refresh();
        }
    }

    pub fn select(&mut self, index: usize) -> Option<&BookDoc> {
        self.session.select(index)
    }

    pub fn close_detail(&mut self) {
        self.session.close_detail();
    }

    /// Re-issue the current query, superseding anything in flight
    pub fn refresh(&mut self) {
        match self.session.begin_fetch() {
            Some(ticket) => self.fetcher.submit(ticket),
            None => self.fetcher.cancel(),
        }
    }

    /// Apply every event that has already arrived. Returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            changed |= self.apply(event);
        }
        changed
    }

    /// Wait until the newest request settles and apply it.
    ///
    /// Returns immediately when nothing is loading.
    pub async fn settle(&mut self) {
        while self.session.ui().loading {
            match self.events.recv().await {
                Some(event) => {
                    self.apply(event);
                }
                None => break,
            }
        }
    }

    fn apply(&mut self, event: FetchEvent) -> bool {
        let succeeded = matches!(event.outcome, FetchOutcome::Success(_));
        let changed = self.session.apply(event);
        if changed && succeeded && self.session.needs_fetch() {
            self.refresh();
        }
        changed
    }
}
