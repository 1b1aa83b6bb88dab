// src/crawl/visited.rs
// =============================================================================
// The set of URLs already fetched during one crawl.
//
// Every collector of every generation shares it. Collectors may run at the
// same time, so "is it visited? if not, mark it" must be one atomic step,
// otherwise two tasks could both decide to fetch the same page.
// DashSet::insert does exactly that: it returns false if the URL was there.
//
// The set only grows. There is no remove.
// =============================================================================

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as visited.
    ///
    /// Returns true if this call added it, false if it was already visited.
    pub fn insert(&self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
