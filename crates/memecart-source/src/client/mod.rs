//! HTTP client for Imgflip's public `get_memes` endpoint.

use std::time::Duration;

use memecart_core::{AppConfig, CatalogItem};
use reqwest::Client;

use crate::error::SourceError;
use crate::normalize::normalize_catalog;
use crate::rate_limit::retry_with_backoff;
use crate::source::CatalogSource;
use crate::types::ImgflipResponse;

/// Retry-After fallback when a 429 carries no usable header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client for the Imgflip catalog listing.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. A 200 response whose payload reports `"success": false`
/// becomes [`SourceError::Unsuccessful`].
///
/// Transient errors (429, 5xx, network failures) are automatically retried
/// with exponential backoff up to `max_retries` additional attempts.
pub struct ImgflipClient {
    client: Client,
    catalog_url: String,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl ImgflipClient {
    /// Creates an `ImgflipClient` with configured endpoint, timeout,
    /// `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] if `catalog_url` does not parse,
    /// or [`SourceError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(
        catalog_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, SourceError> {
        let parsed = reqwest::Url::parse(catalog_url).map_err(|e| SourceError::InvalidUrl {
            url: catalog_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceError::InvalidUrl {
                url: catalog_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            catalog_url: parsed.to_string(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Creates a client from the application's catalog settings.
    ///
    /// # Errors
    ///
    /// See [`ImgflipClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        Self::new(
            &config.catalog_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    #[must_use]
    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    /// Fetches and parses the raw listing, with automatic retry on transient
    /// errors.
    ///
    /// # Errors
    ///
    /// - [`SourceError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`SourceError::NotFound`]: HTTP 404 (not retried).
    /// - [`SourceError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`SourceError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`SourceError::Deserialize`]: response body is not valid JSON (not retried).
    pub async fn fetch_response(&self) -> Result<ImgflipResponse, SourceError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = self.catalog_url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(SourceError::RateLimited {
                        url,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(SourceError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(SourceError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<ImgflipResponse>(&body).map_err(|e| {
                    SourceError::Deserialize {
                        context: format!("catalog listing from {url}"),
                        source: e,
                    }
                })
            }
        })
        .await
    }
}

impl CatalogSource for ImgflipClient {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, SourceError> {
        let response = self.fetch_response().await?;
        unpack_response(response, &self.catalog_url)
    }
}

/// Turns a parsed response into catalog items, rejecting `success: false`.
fn unpack_response(response: ImgflipResponse, url: &str) -> Result<Vec<CatalogItem>, SourceError> {
    if !response.success {
        return Err(SourceError::Unsuccessful {
            url: url.to_owned(),
            message: response
                .error_message
                .unwrap_or_else(|| "no error message".to_string()),
        });
    }

    let memes = response.data.map(|d| d.memes).unwrap_or_default();
    let raw_count = memes.len();
    let items = normalize_catalog(memes);
    tracing::info!(url, raw_count, items = items.len(), "fetched catalog");
    Ok(items)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
