//! Core data models for book search.

mod book;
mod search;

pub use book::BookDoc;
pub use search::{SearchField, SearchQuery, SearchResult, UiState, PAGE_SIZE};
