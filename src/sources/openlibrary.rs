//! Open Library search source implementation.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::models::{BookDoc, SearchQuery, SearchResult, PAGE_SIZE};
use crate::sources::{BookSource, SourceError};
use crate::utils::HttpClient;

/// Default API host
pub const DEFAULT_API_BASE: &str = "https://openlibrary.org";

/// Response fields the UI consumes
const RESPONSE_FIELDS: &str =
    "key,title,author_name,first_publish_year,cover_i,edition_count,subject";

/// Open Library search source
///
/// Uses the `search.json` endpoint, one page of [`PAGE_SIZE`] records per call.
#[derive(Debug, Clone)]
pub struct OpenLibrarySource {
    client: HttpClient,
    api_base: String,
}

impl OpenLibrarySource {
    /// Create a source pointed at the public Open Library host
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_API_BASE)
    }

    /// Create a source pointed at a custom host (mirrors, test servers)
    pub fn with_base_url(client: HttpClient, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the request URL for a query
    pub fn build_url(&self, query: &SearchQuery) -> Result<Url, SourceError> {
        let page = query.page.max(1).to_string();
        let limit = PAGE_SIZE.to_string();
        let url = Url::parse_with_params(
            &format!("{}/search.json", self.api_base),
            &[
                (query.field.param(), query.text.trim()),
                ("page", page.as_str()),
                ("limit", limit.as_str()),
                ("fields", RESPONSE_FIELDS),
            ],
        )?;
        Ok(url)
    }
}

#[async_trait]
impl BookSource for OpenLibrarySource {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "Open Library"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SourceError> {
        if query.is_empty() {
            return Err(SourceError::InvalidRequest("empty query".to_string()));
        }

        let url = self.build_url(query)?;
        tracing::debug!(%url, "searching Open Library");

        let response = self
            .client
            .client()
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Open Library: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Open Library returned status: {}",
                response.status()
            )));
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        tracing::debug!(
            found = data.num_found,
            returned = data.docs.len(),
            "Open Library search complete"
        );

        Ok(SearchResult::new(data.docs, data.num_found))
    }
}

// ===== Open Library API Types =====

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "numFound", alias = "num_found", default)]
    num_found: u64,
    #[serde(default)]
    docs: Vec<BookDoc>,
}
