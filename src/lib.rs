// src/lib.rs
// =============================================================================
// wiki-crawler: collect the unique article links reachable from one wiki page
// within a few link hops, and write them out as CSV and JSON.
//
// The pieces, leaves first:
// - wiki::LinkValidator: is this URL an article link?
// - fetch::PageLinkFetcher: get one page's links (HttpLinkFetcher for real use)
// - crawl::PageLinkCollector: one URL -> at most N new links
// - crawl::GenerationalCrawler: N generations of collecting
// - report::ReportWriter: CSV + JSON files
//
// Example:
//   let validator = LinkValidator::new("wikipedia.org")?;
//   let request = CrawlRequest::new(seed, 2, 9, &validator)?;
//   let fetcher = HttpLinkFetcher::new(timeout, user_agent)?;
//   let collector = PageLinkCollector::new(fetcher, validator, base_url);
//   let crawler = GenerationalCrawler::new(collector, FailurePolicy::Strict);
//   let report = crawler.crawl(&request, &CancellationToken::new()).await?;
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod report;
pub mod telemetry;
pub mod wiki;

pub use config::{CrawlConfig, FailurePolicy};
pub use crawl::{CrawlRequest, GenerationalCrawler, PageLinkCollector, VisitedSet};
pub use error::{CrawlError, FetchError, ReportError, ValidationError};
pub use fetch::{HttpLinkFetcher, PageLinkFetcher};
pub use report::{CrawlReport, FailedPage, ReportWriter};
pub use wiki::LinkValidator;
