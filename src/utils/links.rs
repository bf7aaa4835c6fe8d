//! Cover image and book page URL helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default host serving cover images
pub const DEFAULT_COVERS_BASE: &str = "https://covers.openlibrary.org";

/// Default host for per-book pages
pub const DEFAULT_SITE_BASE: &str = "https://openlibrary.org";

/// Cover image size code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverSize {
    #[serde(rename = "S")]
    Small,
    #[default]
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl CoverSize {
    /// Single-letter size code used in cover URLs
    pub fn code(&self) -> char {
        match self {
            CoverSize::Small => 'S',
            CoverSize::Medium => 'M',
            CoverSize::Large => 'L',
        }
    }
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Builds outbound links from configured base URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    covers_base: String,
    site_base: String,
}

impl Default for Links {
    fn default() -> Self {
        Self::new(DEFAULT_COVERS_BASE, DEFAULT_SITE_BASE)
    }
}

impl Links {
    /// Create from base URLs; trailing slashes are ignored
    pub fn new(covers_base: impl Into<String>, site_base: impl Into<String>) -> Self {
        Self {
            covers_base: covers_base.into().trim_end_matches('/').to_string(),
            site_base: site_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Cover image URL for a numeric cover identifier
    pub fn cover(&self, cover_id: u64, size: CoverSize) -> String {
        format!("{}/b/id/{}-{}.jpg", self.covers_base, cover_id, size.code())
    }

    /// Book page URL for a work key such as `/works/OL45804W`
    pub fn work(&self, key: &str) -> String {
        if key.starts_with('/') {
            format!("{}{}", self.site_base, key)
        } else {
            format!("{}/{}", self.site_base, key)
        }
    }
}

/// Cover image URL on the default host
pub fn cover_url(cover_id: u64, size: CoverSize) -> String {
    Links::default().cover(cover_id, size)
}

/// Book page URL on the default host
pub fn work_url(key: &str) -> String {
    Links::default().work(key)
}
