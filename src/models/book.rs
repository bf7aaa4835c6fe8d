//! Book model representing a single bibliographic record from Open Library.

use serde::{Deserialize, Serialize};

use crate::utils::{CoverSize, Links};

/// A single bibliographic record returned by the search API
///
/// Field names on the wire follow the Open Library search response
/// (`author_name`, `cover_i`, `subject`); records are kept exactly as
/// received and never mutated locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDoc {
    /// Work key, e.g. `/works/OL45804W`
    #[serde(default)]
    pub key: String,

    /// Title of the work
    #[serde(default)]
    pub title: String,

    /// Author names in the order the API returned them
    #[serde(rename = "author_name", default)]
    pub author_names: Vec<String>,

    /// Year of first publication
    #[serde(default)]
    pub first_publish_year: Option<i32>,

    /// Numeric cover identifier used to build cover image URLs
    #[serde(rename = "cover_i", default)]
    pub cover_id: Option<u64>,

    /// Number of known editions
    #[serde(default)]
    pub edition_count: Option<u32>,

    /// Subject headings
    #[serde(rename = "subject", default)]
    pub subjects: Vec<String>,
}

impl BookDoc {
    /// Create a record with just a key and a title
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set author names
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_names = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set first publish year
    pub fn first_publish_year(mut self, year: i32) -> Self {
        self.first_publish_year = Some(year);
        self
    }

    /// Set cover identifier
    pub fn cover_id(mut self, cover_id: u64) -> Self {
        self.cover_id = Some(cover_id);
        self
    }

    /// Set edition count
    pub fn edition_count(mut self, count: u32) -> Self {
        self.edition_count = Some(count);
        self
    }

    /// Set subjects
    pub fn subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    /// Authors joined for display, or "Unknown author" when the record has none
    pub fn authors_display(&self) -> String {
        if self.author_names.is_empty() {
            "Unknown author".to_string()
        } else {
            self.author_names.join(", ")
        }
    }

    /// Cover image URL, if the record carries a cover identifier
    pub fn cover_url(&self, links: &Links, size: CoverSize) -> Option<String> {
        self.cover_id.map(|id| links.cover(id, size))
    }

    /// Link to the book's page on the Open Library site
    pub fn work_url(&self, links: &Links) -> String {
        links.work(&self.key)
    }
}
