//! Camouflaged HTTP client for outbound provider and collaborator calls
//!
//! All outbound traffic shares one connection pool. Before each request the
//! client sleeps a random jitter interval and attaches a randomized
//! browser-like header set; requests that come back with a retryable status
//! (429/500/502/503/504) are retried with exponential backoff up to a bounded
//! attempt count. Exhausting retries surfaces the last failure to the caller.

use std::time::Duration;

use rand::Rng;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult, ProviderError};
use crate::utils::headers::randomized_headers;

/// Statuses worth retrying; everything else surfaces immediately
const RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Tuning knobs for the camouflage layer
#[derive(Debug, Clone)]
pub struct CamouflageOptions {
    pub connect_timeout: Duration,
    pub jitter_min: Duration,
    pub jitter_max: Duration,
    pub max_attempts: u32,
    pub retry_initial_backoff: Duration,
}

impl Default for CamouflageOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            jitter_min: Duration::from_millis(500),
            jitter_max: Duration::from_secs(2),
            max_attempts: 3,
            retry_initial_backoff: Duration::from_secs(1),
        }
    }
}

/// HTTP client wrapping a shared reqwest pool with camouflage and retry
pub struct CamouflagedHttpClient {
    client: Client,
    options: CamouflageOptions,
}

impl CamouflagedHttpClient {
    pub fn new(options: CamouflageOptions) -> Self {
        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, options }
    }

    /// Random pre-request delay so outbound calls have no fixed cadence
    async fn jitter(&self) {
        let min = self.options.jitter_min;
        let max = self.options.jitter_max.max(min);
        let delay = if max > min {
            let span = (max - min).as_millis() as u64;
            min + Duration::from_millis(rand::rng().random_range(0..=span))
        } else {
            min
        };

        debug!("Camouflage jitter: sleeping {:?}", delay);
        tokio::time::sleep(delay).await;
    }

    /// Execute a request with camouflage headers and bounded retry
    ///
    /// The builder closure is re-invoked for every attempt because a sent
    /// `RequestBuilder` cannot be reused.
    async fn execute<F>(&self, build: F) -> AppResult<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        self.jitter().await;

        let mut attempt: u32 = 1;
        loop {
            let mut request = build(&self.client);
            for (name, value) in randomized_headers() {
                request = request.header(name, value);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();

            if RETRYABLE_STATUSES.contains(&status) && attempt < self.options.max_attempts {
                let backoff = self.options.retry_initial_backoff * 2u32.pow(attempt - 1);
                warn!(
                    "Retryable status {} (attempt {}/{}), backing off {:?}",
                    status, attempt, self.options.max_attempts, backoff
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
                continue;
            }

            return Ok(response);
        }
    }

    fn check_status(response: &Response, url: &str) -> AppResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(AppError::Provider(ProviderError::Http {
            status: status.as_u16(),
            message: format!(
                "{} - URL: {}",
                status.canonical_reason().unwrap_or("Unknown"),
                url
            ),
        }))
    }

    /// Fetch URL and return the body as text
    pub async fn get_text(&self, url: &str) -> AppResult<String> {
        debug!("Fetching text content from: {}", url);

        let response = self.execute(|client| client.get(url)).await?;
        Self::check_status(&response, url)?;

        let content = response.text().await?;
        debug!("Fetched {} characters of text content", content.len());
        Ok(content)
    }

    /// Fetch URL and return the body parsed as JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        debug!("Fetching JSON content from: {}", url);

        let response = self.execute(|client| client.get(url)).await?;
        Self::check_status(&response, url)?;

        let value = response.json().await?;
        Ok(value)
    }

    /// POST a JSON body and return the response parsed as JSON
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> AppResult<T> {
        debug!("Posting JSON to: {}", url);

        let response = self.execute(|client| client.post(url).json(body)).await?;
        Self::check_status(&response, url)?;

        let value = response.json().await?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn jitter_respects_configured_bounds() {
        let client = CamouflagedHttpClient::new(CamouflageOptions {
            jitter_min: Duration::from_millis(10),
            jitter_max: Duration::from_millis(30),
            ..CamouflageOptions::default()
        });

        let started = Instant::now();
        client.jitter().await;
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(10));
        // Generous upper bound; the sleep itself is not exact
        assert!(elapsed < Duration::from_millis(500));
    }

    #[test]
    fn retryable_statuses_match_policy() {
        for status in [429u16, 500, 502, 503, 504] {
            assert!(RETRYABLE_STATUSES.contains(&status));
        }
        assert!(!RETRYABLE_STATUSES.contains(&404));
        assert!(!RETRYABLE_STATUSES.contains(&403));
    }
}
