// src/page/fetch.rs
// =============================================================================
// This module downloads pages.
//
// The crawl engine only knows about the Fetcher trait, so tests can swap in
// an in-memory site. HttpFetcher is the real implementation on top of
// reqwest:
// - follows redirects (up to a configurable limit)
// - sends the same User-Agent header on every request
// - reads the whole body as text
// - turns reqwest errors into a FetchError the caller can match on
//
// Rust concepts:
// - Traits: an interface the engine is generic over
// - async-trait: lets a trait have async methods
// =============================================================================

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Identifies the crawler to the servers it talks to
pub const DEFAULT_USER_AGENT: &str = "InspectionTool/1.0";

/// What came back from the server
///
/// Any status is a successful *fetch*; the engine decides that only 200
/// counts as a visited page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

#[cfg(test)]
impl FetchedPage {
    pub fn ok(body: impl Into<String>) -> Self {
        FetchedPage {
            status: 200,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Fetches pages over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the client once; it is reused for every page (connection pooling)
    //
    // Parameters:
    //   user_agent: value of the User-Agent header
    //   timeout: per-request timeout, covering connect and body read
    //   max_redirects: how many redirects to follow before giving up
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        max_redirects: usize,
    ) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        } else {
            tracing::warn!("ignoring invalid user agent {:?}", user_agent);
            headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .build()?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(categorize_error)?;
        Ok(FetchedPage { status, body })
    }
}

// Sorts reqwest errors into the cases the crawl reports differently
//
// Same idea as sorting a failed link check: timeouts and redirect loops get
// their own variant, a request that could not even be built means the URL
// itself is bad, everything else is a transport failure.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_builder() {
        FetchError::InvalidUrl(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(5), 10).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_url_is_invalid() {
        // Fails while building the request, so no network is needed
        let result = fetcher().fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_bad_user_agent_falls_back() {
        let result = HttpFetcher::new("bad\nagent", Duration::from_secs(5), 10);
        assert!(result.is_ok());
    }

    #[test]
    fn test_fetched_page_ok() {
        let page = FetchedPage::ok("<html></html>");
        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<html></html>");
    }
}
