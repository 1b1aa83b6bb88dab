// src/crawl/collector.rs
// =============================================================================
// Expands one URL into a bounded set of new article links.
//
// How it works:
// 1. Start a local work set with just the given URL
// 2. Take any URL out of the work set; skip it if the crawl already fetched it
// 3. Fetch it, normalize every raw link, drop non-articles
// 4. Each link nobody has seen yet goes into the result AND the work set
// 5. Stop when the result holds `per_page_cap` links or the work set is empty
//
// Step 4 means a page with only a couple of links can still yield a full
// set: the links it found are fetched in turn within the same call.
// The cap counts links in the result, not pages fetched.
//
// A failed fetch fails the whole call; links gathered so far are dropped.
// =============================================================================

use std::collections::HashSet;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use super::VisitedSet;
use crate::error::FetchError;
use crate::fetch::PageLinkFetcher;
use crate::wiki::LinkValidator;

/// Why a single collect call produced no links
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("collection cancelled")]
    Cancelled,
}

pub struct PageLinkCollector<F> {
    fetcher: F,
    validator: LinkValidator,
    base_url: Url,
}

impl<F: PageLinkFetcher> PageLinkCollector<F> {
    /// `base_url` is the site root that relative `/wiki/...` links are joined onto
    pub fn new(fetcher: F, validator: LinkValidator, base_url: Url) -> Self {
        Self {
            fetcher,
            validator,
            base_url,
        }
    }

    /// Turns a raw link into an absolute article link, or None if it isn't one.
    ///
    /// Query and fragment are dropped so "Rust#History" and "Rust" are the same link.
    //
    // Parameters:
    //   raw: an href as found on the page (relative or absolute)
    //
    // Returns:
    //   Some(absolute link) if it passes the article-link check, else None
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let mut url = self.base_url.join(raw.trim()).ok()?;
        url.set_fragment(None);
        url.set_query(None);

        let link = url.to_string();
        self.validator.is_valid_article_link(&link).then_some(link)
    }

    /// Collects at most `per_page_cap` links reachable from `seed_url`.
    ///
    /// Never returns `seed_url` or anything that was in `visited` when the
    /// call started. Returns an empty set if `seed_url` was already visited.
    //
    // Parameters:
    //   seed_url: the page to start from (already normalized)
    //   per_page_cap: most links this call may return
    //   visited: pages fetched by any collector of this crawl
    //   cancel: checked before every fetch and raced against it
    //
    // Returns:
    //   Ok(links) - up to `per_page_cap` links nobody had seen yet
    //   Err(Fetch) - the first fetch that failed (partial links are dropped)
    //   Err(Cancelled) - the token fired before or during a fetch
    pub async fn collect(
        &self,
        seed_url: &str,
        per_page_cap: usize,
        visited: &VisitedSet,
        cancel: &CancellationToken,
    ) -> Result<HashSet<String>, CollectError> {
        let mut found = HashSet::new();

        // Step 1: another collector got here first
        if visited.contains(seed_url) {
            debug!(url = seed_url, "already visited, nothing to collect");
            return Ok(found);
        }

        // Step 2: local work set, seeded with the start page
        let mut to_scrape = HashSet::from([seed_url.to_string()]);

        while found.len() < per_page_cap {
            let Some(current) = take_any(&mut to_scrape) else {
                break;
            };

            if cancel.is_cancelled() {
                return Err(CollectError::Cancelled);
            }

            // Check and mark in one step; another collector may want it too
            if !visited.insert(&current) {
                continue;
            }

            // Step 3: fetch, unless cancelled first
            debug!(url = %current, "scraping");
            let raw_links = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CollectError::Cancelled),
                fetched = self.fetcher.fetch(&current) => fetched?,
            };

            // Step 4: keep new article links, queue them for scraping too
            for raw in raw_links {
                let Some(link) = self.normalize(&raw) else {
                    continue;
                };
                if found.contains(&link) || visited.contains(&link) {
                    continue;
                }

                to_scrape.insert(link.clone());
                found.insert(link);
                if found.len() >= per_page_cap {
                    break;
                }
            }
        }

        Ok(found)
    }
}

// Removes and returns an arbitrary element; order doesn't matter here
fn take_any(set: &mut HashSet<String>) -> Option<String> {
    let next = set.iter().next()?.clone();
    set.take(&next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::stub::{article, StubFetcher, BASE};

    fn collector(stub: StubFetcher) -> PageLinkCollector<StubFetcher> {
        PageLinkCollector::new(
            stub,
            LinkValidator::new("example.org").unwrap(),
            Url::parse(BASE).unwrap(),
        )
    }

    #[test]
    fn test_normalize_resolves_and_filters() {
        let collector = collector(StubFetcher::new());
        assert_eq!(collector.normalize("/wiki/Rust"), Some(article("Rust")));
        assert_eq!(collector.normalize("/wiki/Rust#History"), Some(article("Rust")));
        assert_eq!(collector.normalize("/wiki/File:Foo.png"), None);
        assert_eq!(collector.normalize("/w/index.php"), None);
    }

    #[tokio::test]
    async fn test_caps_result_size() {
        let stub = StubFetcher::new().links("A", &["B", "C", "D", "E"]);
        let collector = collector(stub);
        let visited = VisitedSet::new();

        let links = collector
            .collect(&article("A"), 2, &visited, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(links.len(), 2);
        assert!(!links.contains(&article("A")));
    }

    #[tokio::test]
    async fn test_chains_through_found_links_until_cap() {
        // A has one link; the cap can only be met by fetching B too
        let stub = StubFetcher::new().links("A", &["B"]).links("B", &["C", "D"]);
        let collector = collector(stub);
        let visited = VisitedSet::new();

        let links = collector
            .collect(&article("A"), 3, &visited, &CancellationToken::new())
            .await
            .unwrap();

        let expected: HashSet<String> = ["B", "C", "D"].iter().map(|t| article(t)).collect();
        assert_eq!(links, expected);
        assert!(visited.contains(&article("B")));
    }

    #[tokio::test]
    async fn test_excludes_links_visited_before_the_call() {
        let stub = StubFetcher::new().links("A", &["B", "C", "D"]);
        let collector = collector(stub);
        let visited = VisitedSet::new();
        visited.insert(&article("B"));

        let links = collector
            .collect(&article("A"), 5, &visited, &CancellationToken::new())
            .await
            .unwrap();

        assert!(!links.contains(&article("B")));
        assert!(links.contains(&article("C")));
        assert!(links.contains(&article("D")));
    }

    #[tokio::test]
    async fn test_skips_namespaced_links() {
        let stub = StubFetcher::new().page("A", &["/wiki/File:Foo.png", "/wiki/Category:X", "/wiki/B"]);
        let collector = collector(stub);

        let links = collector
            .collect(&article("A"), 5, &VisitedSet::new(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(links, HashSet::from([article("B")]));
    }

    #[tokio::test]
    async fn test_already_visited_seed_returns_empty() {
        let stub = StubFetcher::new().links("A", &["B"]);
        let collector = collector(stub);
        let visited = VisitedSet::new();
        visited.insert(&article("A"));

        let links = collector
            .collect(&article("A"), 5, &visited, &CancellationToken::new())
            .await
            .unwrap();

        assert!(links.is_empty());
        assert_eq!(collector.fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_discards_partial_results() {
        let stub = StubFetcher::new().links("A", &["B"]).failing("B");
        let collector = collector(stub);

        let err = collector
            .collect(&article("A"), 5, &VisitedSet::new(), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            CollectError::Fetch(fetch) => assert_eq!(fetch.url(), article("B")),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_before_fetching() {
        let stub = StubFetcher::new().links("A", &["B"]);
        let collector = collector(stub);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = collector
            .collect(&article("A"), 5, &VisitedSet::new(), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, CollectError::Cancelled));
        assert_eq!(collector.fetcher.total_calls(), 0);
    }
}
