// src/error.rs
// =============================================================================
// Error types for the crawler library.
//
// The binary uses anyhow (one error type, lots of context), but the library
// needs callers to tell failures apart:
// - ValidationError: bad input, found before any network work starts
// - FetchError: one page could not be fetched
// - CrawlError: what a whole crawl can end with (including cancellation)
// - ReportError: writing the CSV/JSON files failed
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets the ? operator convert one error type into another
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

use crate::report::CrawlReport;

/// Input rejected before the crawl begins. Never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid article link '{0}': expected https://<lang>.<site>/wiki/<Title> without ':' in the title")]
    InvalidSeed(String),

    #[error("generations must be between {min} and {max}, got {got}")]
    GenerationsOutOfRange { got: usize, min: usize, max: usize },

    #[error("max links per page must be at least 1")]
    ZeroLinkCap,

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("invalid site domain '{0}'")]
    InvalidSiteDomain(String),

    #[error("base url '{0}' must be an https url")]
    InvalidBaseUrl(String),
}

/// A single page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } | FetchError::Status { url, .. } => url,
        }
    }
}

/// Ways a crawl can end without a complete report.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to fetch links: {0}")]
    Fetch(#[from] FetchError),

    // The partial report is boxed to keep the Result small
    #[error("crawl cancelled with {} link(s) collected", partial.total_links)]
    Cancelled { partial: Box<CrawlReport> },
}

/// Writing the report files failed.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
