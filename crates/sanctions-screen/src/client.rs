//! HTTP retrieval of search result pages.

use crate::config::ScreenConfig;
use crate::error::{FetchError, ScreenError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Charset used when the server does not declare one.
const FALLBACK_CHARSET: &str = "utf-8";

/// A fetched search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL the request was sent to.
    pub requested_url: String,
    /// URL after redirects.
    pub final_url: String,
    /// Body decoded with the declared charset, invalid bytes replaced.
    pub body: String,
}

/// Something that can retrieve the search page for a name.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Search URL for `name`, as it would be requested.
    fn search_url(&self, name: &str) -> Result<Url, FetchError>;

    /// Fetch the result page for `name`. Exactly one attempt, no retries.
    async fn fetch(&self, name: &str) -> Result<FetchedPage, FetchError>;
}

/// Build `<root>/search/?q=<name>` with the name form-encoded as one parameter.
pub fn build_search_url(site_root: &str, name: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("{}/search/", site_root.trim_end_matches('/')))?;
    url.query_pairs_mut().append_pair("q", name);
    Ok(url)
}

/// Reqwest-backed client for the public search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    site_root: String,
    timeout: Duration,
}

impl SearchClient {
    pub fn new(config: &ScreenConfig) -> Result<Self, ScreenError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(ScreenError::Client)?;

        Ok(Self {
            http,
            site_root: config.site_root().to_string(),
            timeout: config.timeout,
        })
    }

    fn classify_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                timeout_secs: self.timeout.as_secs_f64(),
            }
        } else {
            FetchError::from(err)
        }
    }
}

#[async_trait]
impl PageFetcher for SearchClient {
    fn search_url(&self, name: &str) -> Result<Url, FetchError> {
        Ok(build_search_url(&self.site_root, name)?)
    }

    async fn fetch(&self, name: &str) -> Result<FetchedPage, FetchError> {
        let url = self.search_url(name)?;
        debug!(%url, "requesting search page");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let response = response
            .error_for_status()
            .map_err(|e| self.classify_error(e))?;
        let final_url = response.url().to_string();

        let body = response
            .text_with_charset(FALLBACK_CHARSET)
            .await
            .map_err(|e| self.classify_error(e))?;

        Ok(FetchedPage {
            requested_url: url.to_string(),
            final_url,
            body,
        })
    }
}
