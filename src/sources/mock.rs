//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::models::{BookDoc, SearchQuery, SearchResult};
use crate::sources::{BookSource, SourceError};

#[derive(Debug, Clone)]
enum MockOutcome {
    Found(SearchResult),
    Failed(String),
}

#[derive(Debug, Clone)]
struct MockReply {
    outcome: MockOutcome,
    delay: Duration,
}

/// A mock source for testing that returns predefined responses keyed by query text.
///
/// Unknown query texts resolve immediately to an empty result.
#[derive(Debug, Default)]
pub struct MockSource {
    replies: Mutex<HashMap<String, MockReply>>,
    queries: Mutex<Vec<SearchQuery>>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `result` for searches with this text.
    pub fn set_response(&self, text: &str, result: SearchResult) {
        self.insert(text, MockOutcome::Found(result), Duration::ZERO);
    }

    /// Return `result` for searches with this text after `delay`.
    pub fn set_delayed_response(&self, text: &str, result: SearchResult, delay: Duration) {
        self.insert(text, MockOutcome::Found(result), delay);
    }

    /// Fail searches with this text with an API error carrying `message`.
    pub fn set_failure(&self, text: &str, message: &str) {
        self.insert(text, MockOutcome::Failed(message.to_string()), Duration::ZERO);
    }

    /// Number of searches started.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of searches that ran to completion (not aborted mid-delay).
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Every query received, in order.
    pub fn received(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn insert(&self, text: &str, outcome: MockOutcome, delay: Duration) {
        let mut guard = self.replies.lock().unwrap();
        guard.insert(text.to_string(), MockReply { outcome, delay });
    }
}

#[async_trait]
impl BookSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        let reply = self.replies.lock().unwrap().get(&query.text).cloned();
        let Some(reply) = reply else {
            self.completed.fetch_add(1, Ordering::SeqCst);
            return Ok(SearchResult::empty());
        };

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match reply.outcome {
            MockOutcome::Found(result) => Ok(result),
            MockOutcome::Failed(message) => Err(SourceError::Api(message)),
        }
    }
}

/// Helper function to create a page of numbered mock books for testing.
pub fn make_books(prefix: &str, count: usize) -> Vec<BookDoc> {
    (1..=count)
        .map(|i| {
            BookDoc::new(format!("/works/{}{}W", prefix, i), format!("{} {}", prefix, i))
                .authors([format!("Author {}", i)])
        })
        .collect()
}
