// src/fetch/http.rs
// =============================================================================
// The real page fetcher: HTTP GET with reqwest, link extraction with scraper.
//
// How it works:
// 1. GET the page (one shared Client, so connections are pooled)
// 2. Anything other than a 2xx status is a FetchError
// 3. Parse the HTML and select every <a href>
// 4. Resolve each href against the page URL
// 5. Keep only links on the same host whose path starts with /wiki/
//
// Rust concepts:
// - async-trait: async fn in a trait we can swap out in tests
// - HashSet: the same link appears many times on a wiki page; we return it once
// =============================================================================

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use super::PageLinkFetcher;
use crate::error::FetchError;

const ARTICLE_PATH_PREFIX: &str = "/wiki/";

/// PageLinkFetcher backed by a reqwest Client
#[derive(Debug, Clone)]
pub struct HttpLinkFetcher {
    client: Client,
}

impl HttpLinkFetcher {
    /// Creates a fetcher with a per-request timeout and User-Agent
    ///
    /// Wikimedia sites reject requests without a descriptive User-Agent,
    /// so it is always set.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(transport)
    }
}

#[async_trait]
impl PageLinkFetcher for HttpLinkFetcher {
    async fn fetch(&self, url: &str) -> Result<HashSet<String>, FetchError> {
        let html = self.fetch_page(url).await?;

        // Html is not Send, so parsing stays inside this synchronous call
        let links = extract_article_links(&html, url);
        debug!(url, links = links.len(), "fetched page");
        Ok(links)
    }
}

// Extracts article links from HTML
//
// Parameters:
//   html: the page HTML
//   page_url: the URL the HTML came from (for relative links and the host check)
//
// Returns: absolute article URLs on the same host, without fragments
//
// Example:
//   html = "<a href='/wiki/Rust'>Rust</a>"
//   page_url = "https://en.wikipedia.org/wiki/Main_Page"
//   result = {"https://en.wikipedia.org/wiki/Rust"}
pub fn extract_article_links(html: &str, page_url: &str) -> HashSet<String> {
    let mut links = HashSet::new();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return links,
    };

    let document = Html::parse_document(html);
    let selector = anchor_selector();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.starts_with('#') {
            continue;
        }

        let Ok(mut resolved) = base.join(href) else {
            continue;
        };
        resolved.set_fragment(None);

        if resolved.host_str() == base.host_str() && resolved.path().starts_with(ARTICLE_PATH_PREFIX) {
            links.insert(resolved.to_string());
        }
    }

    links
}

fn anchor_selector() -> Selector {
    // Constant selector, it always parses
    Selector::parse("a[href]").expect("'a[href]' is a valid selector")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = "https://en.example.org/wiki/Main_Page";

    #[test]
    fn test_extracts_relative_article_links() {
        let html = r#"<a href="/wiki/Rust">Rust</a><a href="/wiki/Ferris">Ferris</a>"#;
        let links = extract_article_links(html, PAGE);
        assert_eq!(links.len(), 2);
        assert!(links.contains("https://en.example.org/wiki/Rust"));
    }

    #[test]
    fn test_skips_other_hosts_and_non_article_paths() {
        let html = r##"
            <a href="https://de.example.org/wiki/Rost">Rost</a>
            <a href="/w/index.php?title=Rust">Edit</a>
            <a href="#cite_note-1">[1]</a>
            <a href="mailto:info@example.org">Mail</a>
        "##;
        assert!(extract_article_links(html, PAGE).is_empty());
    }

    #[test]
    fn test_deduplicates_and_drops_fragments() {
        let html = r##"
            <a href="/wiki/Rust">Rust</a>
            <a href="/wiki/Rust#History">History</a>
            <a href="https://en.example.org/wiki/Rust">Rust again</a>
        "##;
        let links = extract_article_links(html, PAGE);
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://en.example.org/wiki/Rust"));
    }

    #[test]
    fn test_invalid_page_url_yields_nothing() {
        assert!(extract_article_links(r#"<a href="/wiki/Rust">Rust</a>"#, "not a url").is_empty());
    }

    #[tokio::test]
    async fn test_fetch_returns_links_from_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Start"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body><a href="/wiki/Next">Next</a><a href="/wiki/File:X.png">img</a></body></html>"#,
            ))
            .mount(&server)
            .await;

        let fetcher = HttpLinkFetcher::new(Duration::from_secs(5), "wiki-crawler-tests").unwrap();
        let links = fetcher.fetch(&format!("{}/wiki/Start", server.uri())).await.unwrap();

        // The fetcher only keeps /wiki/ paths; dropping File: is the collector's job
        assert_eq!(links.len(), 2);
        assert!(links.contains(&format!("{}/wiki/Next", server.uri())));
    }

    #[tokio::test]
    async fn test_fetch_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpLinkFetcher::new(Duration::from_secs(5), "wiki-crawler-tests").unwrap();
        let url = format!("{}/wiki/Missing", server.uri());
        let err = fetcher.fetch(&url).await.unwrap_err();

        match err {
            FetchError::Status { url: failed, status } => {
                assert_eq!(failed, url);
                assert_eq!(status.as_u16(), 404);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
