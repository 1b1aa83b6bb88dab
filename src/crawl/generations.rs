// src/crawl/generations.rs
// =============================================================================
// This module drives the crawl generation by generation.
//
// How it works:
// 1. The frontier starts as {seed}
// 2. Every frontier URL goes through the collector (shared visited set)
// 3. Everything the collectors return becomes the next frontier
// 4. The next frontier is also added to the aggregate (the final result)
// 5. Repeat for the requested number of generations, or stop early
//    when a generation finds nothing new
//
// Generation g+1 never starts before every URL of generation g is done.
// Inside a generation the collectors run concurrently (buffer_unordered),
// and their results are merged only after each one finishes.
//
// Why only 1 to 3 generations?
// - Each frontier URL can add up to `per_page_cap` links
// - So generation g can have up to cap^g URLs to expand
// - Three generations of 9 links is already ~800 pages
// =============================================================================

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{CollectError, PageLinkCollector, VisitedSet};
use crate::config::{FailurePolicy, DEFAULT_CONCURRENCY, MAX_GENERATIONS, MIN_GENERATIONS};
use crate::error::{CrawlError, ValidationError};
use crate::fetch::PageLinkFetcher;
use crate::report::{CrawlReport, FailedPage};
use crate::wiki::LinkValidator;

/// Validated input of one crawl
///
/// The only way to build one is `CrawlRequest::new`, so holding a
/// CrawlRequest means the seed, generation count and cap were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    seed_url: String,
    generations: usize,
    per_page_cap: usize,
}

impl CrawlRequest {
    // Parameters:
    //   seed_url: must pass the article-link check
    //   generations: MIN_GENERATIONS..=MAX_GENERATIONS
    //   per_page_cap: at least 1
    //   validator: the link check for the configured site
    //
    // Returns:
    //   The request, or the first ValidationError found (seed, then range, then cap)
    pub fn new(
        seed_url: &str,
        generations: usize,
        per_page_cap: usize,
        validator: &LinkValidator,
    ) -> Result<Self, ValidationError> {
        validator.require_article_link(seed_url)?;

        if !(MIN_GENERATIONS..=MAX_GENERATIONS).contains(&generations) {
            return Err(ValidationError::GenerationsOutOfRange {
                got: generations,
                min: MIN_GENERATIONS,
                max: MAX_GENERATIONS,
            });
        }

        if per_page_cap == 0 {
            return Err(ValidationError::ZeroLinkCap);
        }

        Ok(Self {
            seed_url: seed_url.to_string(),
            generations,
            per_page_cap,
        })
    }

    pub fn seed_url(&self) -> &str {
        &self.seed_url
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn per_page_cap(&self) -> usize {
        self.per_page_cap
    }
}

pub struct GenerationalCrawler<F> {
    collector: PageLinkCollector<F>,
    policy: FailurePolicy,
    concurrency: usize,
}

impl<F: PageLinkFetcher> GenerationalCrawler<F> {
    // Creates a crawler around a collector
    //
    // Parameters:
    //   collector: does the per-URL work (and owns the fetcher)
    //   policy: Strict aborts on the first failed page, BestEffort skips it
    pub fn new(collector: PageLinkCollector<F>, policy: FailurePolicy) -> Self {
        Self {
            collector,
            policy,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// How many frontier URLs of one generation are collected at the same time.
    /// 1 means strictly sequential. 0 is treated as 1; the CLI rejects it
    /// earlier in `CrawlConfig::validate`.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    // Runs one crawl
    //
    // Parameters:
    //   request: validated seed, generation count and per-page cap
    //   cancel: when triggered, no new fetch starts and in-flight fetches
    //           are abandoned
    //
    // Returns:
    //   Ok(report) when every generation ran (or the frontier ran dry)
    //   Err(Fetch) on the first failed page under the Strict policy
    //   Err(Cancelled { partial }) with everything collected so far
    //
    // All crawl state (visited set, frontier, aggregate) lives inside this
    // call and is dropped when it returns. Two calls never share anything.
    pub async fn crawl(
        &self,
        request: &CrawlRequest,
        cancel: &CancellationToken,
    ) -> Result<CrawlReport, CrawlError> {
        let per_page_cap = request.per_page_cap();

        // The seed goes through the same normalization as discovered links,
        // so "Main_Page#top" and "Main_Page" count as one visit
        let seed = self
            .collector
            .normalize(request.seed_url())
            .unwrap_or_else(|| request.seed_url().to_string());

        // `visited` is a plain reference so every collector future can copy it
        let visited_set = VisitedSet::new();
        let visited = &visited_set;
        let mut aggregate: HashSet<String> = HashSet::new();
        let mut failures: Vec<FailedPage> = Vec::new();
        let mut frontier: HashSet<String> = HashSet::from([seed]);

        for generation in 1..=request.generations() {
            // Nothing new last generation: a natural stop, not an error
            if frontier.is_empty() {
                info!(generation, "frontier is empty, stopping early");
                break;
            }
            if cancel.is_cancelled() {
                return Err(cancelled(aggregate, failures));
            }

            info!(generation, frontier = frontier.len(), "expanding generation");

            // One collector future per frontier URL, at most `concurrency`
            // running at once. They all run on this task, so they can
            // borrow `self`, `visited` and `cancel` instead of cloning them.
            let mut outcomes = stream::iter(frontier.iter())
                .map(|url| async move {
                    let outcome = self.collector.collect(url, per_page_cap, visited, cancel).await;
                    (url, outcome)
                })
                .buffer_unordered(self.concurrency);

            // Each collector returns its own set; they are merged here,
            // so no lock is needed for the next frontier
            let mut next_frontier = HashSet::new();
            let mut was_cancelled = false;

            // Draining the stream is the barrier: the loop only ends after
            // every collector of this generation has finished
            while let Some((url, outcome)) = outcomes.next().await {
                match outcome {
                    Ok(links) => next_frontier.extend(links),
                    // Keep draining: the other collectors see the same token
                    // and return right away
                    Err(CollectError::Cancelled) => was_cancelled = true,
                    Err(CollectError::Fetch(err)) => match self.policy {
                        FailurePolicy::Strict => {
                            // Returning drops the stream and any fetch still in flight
                            warn!(url = %url, error = %err, "aborting crawl");
                            return Err(CrawlError::Fetch(err));
                        }
                        FailurePolicy::BestEffort => {
                            warn!(url = %url, error = %err, "skipping page");
                            failures.push(FailedPage::new(url, &err));
                        }
                    },
                }
            }
            // Releases the borrow of `frontier` before it is replaced
            drop(outcomes);

            aggregate.extend(next_frontier.iter().cloned());

            if was_cancelled {
                return Err(cancelled(aggregate, failures));
            }

            info!(
                generation,
                new_links = next_frontier.len(),
                total_links = aggregate.len(),
                visited = visited.len(),
                "generation complete"
            );
            frontier = next_frontier;
        }

        Ok(CrawlReport::new(aggregate, failures))
    }
}

// Wraps what was collected so far into a cancellation error
fn cancelled(aggregate: HashSet<String>, failures: Vec<FailedPage>) -> CrawlError {
    warn!(links = aggregate.len(), "crawl cancelled");
    CrawlError::Cancelled {
        partial: Box::new(CrawlReport::new(aggregate, failures)),
    }
}
