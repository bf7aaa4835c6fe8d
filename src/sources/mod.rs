//! Bibliographic search backends.
//!
//! This module defines the [`BookSource`] trait that search backends implement.
//! The interactive UI and the one-shot CLI only talk to this trait, so a
//! backend can be swapped for [`MockSource`] in tests.
//!
//! # Backends
//!
//! - [`OpenLibrarySource`] - the Open Library `search.json` endpoint
//! - [`MockSource`] - canned responses with optional per-query delays

mod openlibrary;

pub mod mock;

pub use mock::MockSource;
pub use openlibrary::{OpenLibrarySource, DEFAULT_API_BASE};

use crate::models::{SearchQuery, SearchResult};
use async_trait::async_trait;

/// The BookSource trait defines the interface for all search backends.
#[async_trait]
pub trait BookSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Fetch one page of records matching the query
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request was superseded before it completed
    #[error("Request cancelled")]
    Cancelled,

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl SourceError {
    /// Whether this error stems from intentional cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SourceError::Cancelled)
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::InvalidRequest(format!("URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_classification() {
        assert!(SourceError::Cancelled.is_cancelled());
        assert!(!SourceError::Network("reset".into()).is_cancelled());
        assert!(!SourceError::Api("status 500".into()).is_cancelled());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SourceError::Api("Open Library returned status: 503".into()).to_string(),
            "API error: Open Library returned status: 503"
        );
        let parse: SourceError = serde_json::from_str::<SearchResult>("{").unwrap_err().into();
        assert!(parse.to_string().starts_with("Parse error: JSON:"));
    }
}
