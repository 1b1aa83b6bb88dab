// src/fetch/mod.rs
// =============================================================================
// Fetching a page and pulling out its article links.
//
// The crawler never talks to the network directly. It is handed something
// that implements PageLinkFetcher, so:
// - the real tool uses HttpLinkFetcher (reqwest + scraper)
// - tests use an in-memory stub with fixed pages
//
// Submodules:
// - http: the reqwest/scraper implementation
// - stub: test-only fake fetcher
// =============================================================================

mod http;

#[cfg(test)]
pub(crate) mod stub;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::{extract_article_links, HttpLinkFetcher};

/// Retrieves one page and returns the same-site article links found on it.
///
/// The links are raw: the collector is responsible for normalizing and
/// filtering them. A failure only concerns this one page.
#[async_trait]
pub trait PageLinkFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<HashSet<String>, FetchError>;
}

// Lets callers share one fetcher between several collectors
#[async_trait]
impl<T: PageLinkFetcher + ?Sized> PageLinkFetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> Result<HashSet<String>, FetchError> {
        (**self).fetch(url).await
    }
}
