// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option has a default matching the classic setup (English Wikipedia,
// 2 generations, 9 links per page), and most can also come from an
// environment variable, so the same binary works in a container with only
// env vars set.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct
// - ValueEnum: lets an enum be chosen by name (--failure-policy best-effort)
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use wiki_crawler::config::{
    CrawlConfig, FailurePolicy, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_GENERATIONS,
    DEFAULT_MAX_LINKS_PER_PAGE, DEFAULT_SEED_URL, DEFAULT_SITE_DOMAIN, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};

#[derive(Parser, Debug)]
#[command(
    name = "wiki-crawler",
    version,
    about = "Crawl a wiki for a few generations and report the unique article links found",
    long_about = "wiki-crawler starts at one article, follows article links for 1 to 3 generations \
                  (taking at most N new links per page), and writes every unique link it found \
                  to wiki_links.csv and wiki_links.json."
)]
pub struct Cli {
    /// Article to start from
    ///
    /// Must look like https://<lang>.<site-domain>/wiki/<Title>
    #[arg(default_value = DEFAULT_SEED_URL)]
    pub seed_url: String,

    /// How many generations of links to follow (1-3)
    #[arg(short = 'n', long, env = "WIKI_GENERATIONS", default_value_t = DEFAULT_GENERATIONS)]
    pub generations: usize,

    /// Maximum number of new links taken from one page
    #[arg(long, env = "MAX_LINKS_PER_PAGE", default_value_t = DEFAULT_MAX_LINKS_PER_PAGE)]
    pub max_links_per_page: usize,

    /// Site root that relative /wiki/ links are resolved against
    #[arg(long, env = "WIKI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Domain accepted by the link check (subdomains like "en." are allowed)
    #[arg(long, env = "WIKI_SITE_DOMAIN", default_value = DEFAULT_SITE_DOMAIN)]
    pub site_domain: String,

    /// Directory for wiki_links.csv and wiki_links.json
    #[arg(short, long, env = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// What to do when a page can't be fetched
    #[arg(long, value_enum, default_value_t = FailurePolicy::Strict)]
    pub failure_policy: FailurePolicy,

    /// Pages of one generation fetched at the same time (at least 1)
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Give up (keeping what was found) after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Also print the JSON report to stdout
    #[arg(long)]
    pub json: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            seed_url: self.seed_url.clone(),
            generations: self.generations,
            max_links_per_page: self.max_links_per_page,
            base_url: self.base_url.clone(),
            site_domain: self.site_domain.clone(),
            output_dir: self.output_dir.clone(),
            failure_policy: self.failure_policy,
            concurrency: self.concurrency,
            request_timeout: Duration::from_secs(self.timeout_secs),
            deadline: self.deadline_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why `env = "..."`?
//    - The container image sets WIKI_BASE_URL / MAX_LINKS_PER_PAGE / OUTPUT_DIR
//    - A flag on the command line still wins over the variable
//
// 2. Where do the env vars come from?
//    - The shell, or a .env file in the working directory (main.rs loads it
//      with dotenvy before parsing); real env vars win over .env entries
//
// 3. Why isn't --generations range-checked here?
//    - CrawlRequest::new checks it, so library callers get the same check
//    - The error message then comes from one place
// -----------------------------------------------------------------------------
