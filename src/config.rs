// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Everything that used to be a global constant (base URL, per-page cap,
// output directory) lives in CrawlConfig and is handed to the crawler when
// it is built. Nothing here reads the environment: clap does that in cli.rs.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use url::Url;

use crate::error::ValidationError;

pub const DEFAULT_SEED_URL: &str = "https://en.wikipedia.org/wiki/Main_Page";
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
pub const DEFAULT_SITE_DOMAIN: &str = "wikipedia.org";
pub const DEFAULT_MAX_LINKS_PER_PAGE: usize = 9;
pub const DEFAULT_GENERATIONS: usize = 2;
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("wiki-crawler/", env!("CARGO_PKG_VERSION"));

/// Smallest and largest allowed number of generations
pub const MIN_GENERATIONS: usize = 1;
pub const MAX_GENERATIONS: usize = 3;

/// What to do when one page of a generation cannot be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailurePolicy {
    /// Abort the whole crawl on the first failed page
    #[default]
    Strict,
    /// Skip the failed page, record it, and keep going
    BestEffort,
}

/// Fully resolved settings for one run of the tool
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed_url: String,
    pub generations: usize,
    pub max_links_per_page: usize,
    pub base_url: Url,
    pub site_domain: String,
    pub output_dir: PathBuf,
    pub failure_policy: FailurePolicy,
    pub concurrency: usize,
    pub request_timeout: Duration,
    pub deadline: Option<Duration>,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            generations: DEFAULT_GENERATIONS,
            max_links_per_page: DEFAULT_MAX_LINKS_PER_PAGE,
            // Constant, known to parse
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            site_domain: DEFAULT_SITE_DOMAIN.to_string(),
            output_dir: PathBuf::from("."),
            failure_policy: FailurePolicy::Strict,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            deadline: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlConfig {
    /// Checks the settings that don't depend on the seed URL.
    ///
    /// The seed, generation count and per-page cap are checked by
    /// `CrawlRequest::new`, which is the crawl boundary.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.scheme() != "https" || self.base_url.host_str().is_none() {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.to_string()));
        }

        // buffer_unordered(0) would never poll a single collector
        if self.concurrency == 0 {
            return Err(ValidationError::ZeroConcurrency);
        }
        Ok(())
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join("wiki_links.csv")
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join("wiki_links.json")
    }

    pub fn failures_path(&self) -> PathBuf {
        self.output_dir.join("wiki_links_failures.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_wikipedia() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_links_per_page, 9);
        assert_eq!(config.generations, 2);
        assert_eq!(config.failure_policy, FailurePolicy::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_plain_http_base_url() {
        let config = CrawlConfig {
            base_url: Url::parse("http://en.wikipedia.org").unwrap(),
            ..CrawlConfig::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let config = CrawlConfig {
            concurrency: 0,
            ..CrawlConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::ZeroConcurrency));
    }

    #[test]
    fn test_output_paths_live_in_output_dir() {
        let config = CrawlConfig {
            output_dir: PathBuf::from("/tmp/out"),
            ..CrawlConfig::default()
        };
        assert_eq!(config.csv_path(), PathBuf::from("/tmp/out/wiki_links.csv"));
        assert_eq!(config.json_path(), PathBuf::from("/tmp/out/wiki_links.json"));
    }
}
