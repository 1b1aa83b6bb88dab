// src/report/mod.rs
// =============================================================================
// The crawl result and how it is written out.
//
// CrawlReport is built once, at the end of a crawl, and never changes.
// Its JSON form is exactly:
//   { "total_links": N, "unique_links": N, "links": [...] }
//
// Submodules:
// - writer: CSV and JSON files (plus a failures sidecar)
// =============================================================================

mod writer;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

pub use writer::ReportWriter;

/// A frontier URL that was skipped because it could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPage {
    pub url: String,
    pub error: String,
}

impl FailedPage {
    pub fn new(url: &str, error: &FetchError) -> Self {
        Self {
            url: url.to_string(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub total_links: usize,
    /// Always equal to total_links: links come from a set
    pub unique_links: usize,
    pub links: Vec<String>,
    /// Pages skipped under the best-effort policy; written to a separate file
    #[serde(skip)]
    pub failures: Vec<FailedPage>,
}

impl CrawlReport {
    /// Snapshots the aggregate link set.
    ///
    /// Links are sorted so repeated runs write identical files.
    pub fn new(links: HashSet<String>, failures: Vec<FailedPage>) -> Self {
        let mut links: Vec<String> = links.into_iter().collect();
        links.sort();

        Self {
            total_links: links.len(),
            unique_links: links.len(),
            links,
            failures,
        }
    }

    /// True when no page had to be skipped
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
