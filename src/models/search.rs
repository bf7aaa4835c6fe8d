//! Search query, result and view-state models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::BookDoc;

/// Number of records requested per page
pub const PAGE_SIZE: u32 = 20;

/// Which catalogue field the query text is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Isbn,
}

impl SearchField {
    /// All fields in selector order
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Author, SearchField::Isbn];

    /// Query parameter name used by the search API
    pub fn param(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Isbn => "isbn",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
            SearchField::Isbn => "ISBN",
        }
    }

    /// The field after this one, wrapping around
    pub fn next(&self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Isbn,
            SearchField::Isbn => SearchField::Title,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.param())
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "isbn" => Ok(SearchField::Isbn),
            other => Err(format!("unknown search field: {}", other)),
        }
    }
}

/// Search query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Text entered by the user
    pub text: String,

    /// Field the text is matched against
    pub field: SearchField,

    /// 1-based page number
    pub page: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            field: SearchField::default(),
            page: 1,
        }
    }
}

impl SearchQuery {
    /// Create a new title search for the first page
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the search field
    pub fn field(mut self, field: SearchField) -> Self {
        self.field = field;
        self
    }

    /// Set the page, never going below 1
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Whether there is nothing to search for
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Records on this page, in API order
    pub documents: Vec<BookDoc>,

    /// Total number of matches across all pages
    pub total_found: u64,
}

impl SearchResult {
    /// Create a new result page
    pub fn new(documents: Vec<BookDoc>, total_found: u64) -> Self {
        Self {
            documents,
            total_found,
        }
    }

    /// An empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of pages available for this result's total
    pub fn total_pages(&self) -> u32 {
        crate::session::total_pages(self.total_found)
    }

    /// Whether the page has no records
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Transient view state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// A request for the current query is in flight
    pub loading: bool,

    /// Message from the last failed request
    pub error: Option<String>,

    /// Record shown in the detail panel
    pub selected: Option<BookDoc>,
}
