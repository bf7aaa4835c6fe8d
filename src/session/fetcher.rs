//! Cancellable background fetching.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::{SearchQuery, SearchResult};
use crate::sources::BookSource;

/// Default pause between the last input change and the request
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A request the session wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic id; only the newest ticket's event is applied
    pub generation: u64,
    pub query: SearchQuery,
}

/// How a request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(SearchResult),
    Failure(String),
    Cancelled,
}

/// Outcome of a request, tagged with the ticket that started it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchEvent {
    pub generation: u64,
    pub outcome: FetchOutcome,
}

/// Runs at most one search at a time, aborting the previous one on submit
#[derive(Debug)]
pub struct Fetcher {
    source: Arc<dyn BookSource>,
    debounce: Duration,
    runtime: Handle,
    events: mpsc::UnboundedSender<FetchEvent>,
    in_flight: Option<JoinHandle<()>>,
}

impl Fetcher {
    /// Create a fetcher on the current tokio runtime.
    ///
    /// Panics if called outside a runtime, like `tokio::spawn`.
    pub fn new(
        source: Arc<dyn BookSource>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<FetchEvent>) {
        Self::with_runtime(source, debounce, Handle::current())
    }

    /// Create a fetcher that spawns onto the given runtime
    pub fn with_runtime(
        source: Arc<dyn BookSource>,
        debounce: Duration,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<FetchEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let fetcher = Self {
            source,
            debounce,
            runtime,
            events,
            in_flight: None,
        };
        (fetcher, rx)
    }

    /// Abort whatever is in flight and start `ticket`.
    ///
    /// The new task waits out the debounce delay before calling the source,
    /// so rapid submissions only reach the network once.
    pub fn submit(&mut self, ticket: FetchTicket) {
        self.cancel();

        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let debounce = self.debounce;

        tracing::debug!(
            generation = ticket.generation,
            field = %ticket.query.field,
            page = ticket.query.page,
            "submitting search"
        );

        self.in_flight = Some(self.runtime.spawn(async move {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }

            let outcome = match source.search(&ticket.query).await {
                Ok(result) => FetchOutcome::Success(result),
                Err(e) if e.is_cancelled() => FetchOutcome::Cancelled,
                Err(e) => {
                    tracing::warn!(generation = ticket.generation, "search failed: {}", e);
                    FetchOutcome::Failure(e.to_string())
                }
            };

            // The receiver is gone once the UI shuts down
            let _ = events.send(FetchEvent {
                generation: ticket.generation,
                outcome,
            });
        }));
    }

    /// Abort the in-flight request, if any. Aborted requests report nothing.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                tracing::trace!("aborting in-flight search");
            }
            handle.abort();
        }
    }

    /// Whether a request is still running
    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        self.cancel();
    }
}
