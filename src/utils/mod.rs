//! Utility modules supporting book search.
//!
//! - [`HttpClient`]: shared HTTP client with timeouts and a crate user agent
//! - [`Links`]: cover image and book page URL builder
//! - [`cover_url`] / [`work_url`]: the same URLs on the default Open Library hosts
//!
//! # Cover URLs
//!
//! ```rust
//! use book_finder::utils::{cover_url, CoverSize};
//!
//! let url = cover_url(8231856, CoverSize::Large);
//! assert_eq!(url, "https://covers.openlibrary.org/b/id/8231856-L.jpg");
//! ```

mod http;
mod links;

pub use http::{HttpClient, DEFAULT_TIMEOUT_SECS};
pub use links::{cover_url, work_url, CoverSize, Links, DEFAULT_COVERS_BASE, DEFAULT_SITE_BASE};
