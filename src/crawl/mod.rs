// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - Generation-by-generation expansion starting from one seed article
// - A hard cap on how many new links one page may contribute
// - A crawl-wide visited set, so no page is ever fetched twice
// - Optional concurrency inside a generation, with a barrier between generations
// - Cancellation that still hands back whatever was collected
//
// Submodules:
// - visited: the shared, concurrent visited set
// - collector: expands one frontier URL into at most N new links
// - generations: drives the collector over several generations
// =============================================================================

mod collector;
mod generations;
mod visited;

pub use collector::{CollectError, PageLinkCollector};
pub use generations::{CrawlRequest, GenerationalCrawler};
pub use visited::VisitedSet;
