// src/fetch/stub.rs
// In-memory PageLinkFetcher for tests: fixed pages, fetch counting, and
// URLs that can be told to fail.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use super::PageLinkFetcher;
use crate::error::FetchError;

pub(crate) const BASE: &str = "https://en.example.org";

/// Builds an absolute article URL for a short title like "A"
pub(crate) fn article(title: &str) -> String {
    format!("{BASE}/wiki/{title}")
}

#[derive(Default)]
pub(crate) struct StubFetcher {
    pages: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    cancel_on: Option<(String, CancellationToken)>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a page whose raw links are the given hrefs, as-is
    pub(crate) fn page(mut self, title: &str, hrefs: &[&str]) -> Self {
        self.pages
            .insert(article(title), hrefs.iter().map(|h| h.to_string()).collect());
        self
    }

    /// Adds a page linking to other titles with site-relative hrefs
    pub(crate) fn links(self, title: &str, targets: &[&str]) -> Self {
        let hrefs: Vec<String> = targets.iter().map(|t| format!("/wiki/{t}")).collect();
        let hrefs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
        self.page(title, &hrefs)
    }

    pub(crate) fn failing(mut self, title: &str) -> Self {
        self.failing.insert(article(title));
        self
    }

    /// Cancels `token` while `title` is being fetched
    pub(crate) fn cancel_on(mut self, title: &str, token: CancellationToken) -> Self {
        self.cancel_on = Some((article(title), token));
        self
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub(crate) fn calls_for(&self, title: &str) -> usize {
        self.calls.lock().unwrap().get(&article(title)).copied().unwrap_or(0)
    }

    pub(crate) fn max_calls_per_url(&self) -> usize {
        self.calls.lock().unwrap().values().copied().max().unwrap_or(0)
    }
}

#[async_trait]
impl PageLinkFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<HashSet<String>, FetchError> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        if let Some((trigger, token)) = &self.cancel_on {
            if trigger == url {
                token.cancel();
            }
        }

        if self.failing.contains(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }

        Ok(self
            .pages
            .get(url)
            .map(|hrefs| hrefs.iter().cloned().collect())
            .unwrap_or_default())
    }
}
