// src/wiki/validator.rs
// =============================================================================
// This module checks that a URL looks like a wiki article link.
//
// Accepted shape:
//   https://<optional-subdomain>.<site-domain>/wiki/<Title>
//
// The title must be non-empty and must not contain ':'. Wikis use
// "Namespace:Title" for non-article pages (File:, Category:, Help:, ...),
// so rejecting the colon keeps us on articles only.
//
// Rust concepts:
// - regex::Regex: compiled once, reused for every check
// - regex::escape: turns "wikipedia.org" into "wikipedia\.org" so the dot
//   only matches a literal dot
// =============================================================================

use regex::Regex;

use crate::error::ValidationError;

/// Pure predicate for "is this an article link on our site?"
#[derive(Debug, Clone)]
pub struct LinkValidator {
    pattern: Regex,
    site_domain: String,
}

impl LinkValidator {
    /// Builds a validator for a site domain such as "wikipedia.org"
    pub fn new(site_domain: &str) -> Result<Self, ValidationError> {
        let domain = site_domain.trim().trim_matches('.').to_ascii_lowercase();
        let well_formed = !domain.is_empty()
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !well_formed {
            return Err(ValidationError::InvalidSiteDomain(site_domain.to_string()));
        }

        let pattern = format!(r"^https://(?:[a-z]+\.)?{}/wiki/[^:]+$", regex::escape(&domain));
        let pattern = Regex::new(&pattern)
            .map_err(|_| ValidationError::InvalidSiteDomain(site_domain.to_string()))?;

        Ok(Self {
            pattern,
            site_domain: domain,
        })
    }

    /// Returns true when `url` is an accepted article link.
    ///
    /// Never fails: empty or malformed input is simply not a match.
    pub fn is_valid_article_link(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }

    /// Same check, but as a Result for the crawl boundary
    pub fn require_article_link(&self, url: &str) -> Result<(), ValidationError> {
        if self.is_valid_article_link(url) {
            Ok(())
        } else {
            Err(ValidationError::InvalidSeed(url.to_string()))
        }
    }

    pub fn site_domain(&self) -> &str {
        &self.site_domain
    }
}
