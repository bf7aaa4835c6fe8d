//! # Book Finder
//!
//! Search the Open Library catalogue by title, author or ISBN, page through
//! results twenty at a time and inspect a single record in a detail view.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (BookDoc, SearchQuery, SearchResult, UiState)
//! - [`sources`]: Search backends behind the [`BookSource`] trait
//! - [`session`]: Query state, cancellable fetching and page arithmetic
//! - [`tui`]: Interactive terminal interface
//! - [`ui`]: Styled output for one-shot commands
//! - [`utils`]: HTTP client and cover/page URL helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod session;
pub mod sources;
pub mod tui;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{BookDoc, SearchField, SearchQuery, SearchResult};
pub use session::{SearchController, SearchSession};
pub use sources::{BookSource, OpenLibrarySource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
