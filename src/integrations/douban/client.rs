// src/integrations/douban/client.rs
//
// Source catalog page fetcher.
//
// ARCHITECTURE:
// - One GET per attempt through the injected HttpClient
// - Transient failures (transport error, non-2xx, empty body) are retried
//   a fixed number of times with a fixed delay
// - Exhausted retries surface AppError::Fetch; an empty page is never
//   invented on that path
// - Layout mapping is delegated to `payload`

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::domain::{EndpointSpec, RawItem};
use crate::error::{AppError, AppResult};
use crate::integrations::http::HttpClient;

use super::payload::parse_page;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch one page of raw items starting at `start`
    async fn fetch_page(&self, endpoint: &EndpointSpec, start: u32, count: u32) -> AppResult<Vec<RawItem>>;
}

/// Fixed-count, fixed-delay retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_delay())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

pub struct DoubanClient {
    http: Arc<dyn HttpClient>,
    retry: RetryPolicy,
}

impl DoubanClient {
    pub fn new(http: Arc<dyn HttpClient>, retry: RetryPolicy) -> Self {
        Self { http, retry }
    }

    /// One attempt: Ok(body) only for a 2xx response with a non-blank body.
    /// A request that can never be sent is an outer error and is not retried.
    async fn attempt(&self, url: &str, headers: &[(String, String)]) -> AppResult<Result<String, String>> {
        Ok(match self.http.get(url, headers).await {
            Ok(response) if !response.is_success() => Err(format!("status {}", response.status)),
            Ok(response) if response.body.trim().is_empty() => Err("empty body".to_string()),
            Ok(response) => Ok(response.body),
            Err(e @ AppError::Validation(_)) => return Err(e),
            Err(e) => Err(e.to_string()),
        })
    }
}

#[async_trait]
impl SourceFetcher for DoubanClient {
    async fn fetch_page(&self, endpoint: &EndpointSpec, start: u32, count: u32) -> AppResult<Vec<RawItem>> {
        let url = endpoint.page_url(start, count);
        let mut last_error = String::new();

        for attempt in 1..=self.retry.attempts {
            match self.attempt(&url, &endpoint.headers).await? {
                Ok(body) => {
                    let items = parse_page(endpoint.shape, &body, endpoint.media_hint)?;
                    log::debug!(
                        "[{}] start={} count={} -> {} items (attempt {})",
                        endpoint.label,
                        start,
                        count,
                        items.len(),
                        attempt
                    );
                    return Ok(items);
                }
                Err(reason) => {
                    log::warn!(
                        "[{}] attempt {}/{} failed for {}: {}",
                        endpoint.label,
                        attempt,
                        self.retry.attempts,
                        url,
                        reason
                    );
                    last_error = reason;
                }
            }

            if attempt < self.retry.attempts && !self.retry.delay.is_zero() {
                tokio::time::sleep(self.retry.delay).await;
            }
        }

        Err(AppError::Fetch {
            url,
            attempts: self.retry.attempts,
            message: last_error,
        })
    }
}
