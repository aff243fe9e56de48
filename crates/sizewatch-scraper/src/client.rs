//! HTTP client for retail product pages.

use std::time::Duration;

use reqwest::{Client, Url};
use sizewatch_core::AppConfig;

use crate::check::DocumentLoader;
use crate::error::ScraperError;
use crate::retry::retry_with_backoff;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Fetches product page HTML with a fixed browser-like header set.
///
/// Non-2xx responses become [`ScraperError::UnexpectedStatus`]; network
/// failures and timeouts become [`ScraperError::Http`]. Transient failures
/// are retried with exponential backoff up to `max_retries` extra attempts.
pub struct PageClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl PageClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.fetch_timeout_secs,
            &config.user_agent,
            config.fetch_max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Fetches the full body of `url` as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`]: not an absolute http(s) URL (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: non-2xx after retries (4xx other than 429 not retried).
    /// - [`ScraperError::Http`]: network failure or timeout after retries.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let parsed = parse_page_url(url)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let parsed = parsed.clone();
            async move {
                let response = self
                    .client
                    .get(parsed.clone())
                    .header(reqwest::header::ACCEPT, ACCEPT_HTML)
                    .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
                    .header(reqwest::header::CACHE_CONTROL, "no-cache")
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: parsed.to_string(),
                    });
                }

                let body = response.text().await?;
                tracing::debug!(url = %parsed, bytes = body.len(), "fetched product page");
                Ok(body)
            }
        })
        .await
    }
}

impl DocumentLoader for PageClient {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        self.fetch_page(url).await
    }
}

/// Parses `url` and requires an `http` or `https` scheme.
fn parse_page_url(url: &str) -> Result<Url, ScraperError> {
    let parsed = Url::parse(url.trim()).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
