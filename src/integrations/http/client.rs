// src/integrations/http/client.rs
//
// HTTP capability handed to the integrations at construction time.
//
// ARCHITECTURE:
// - One method: GET a URL with caller-supplied headers
// - Returns status + body; callers decide what counts as failure
// - Retry policy belongs to the caller, never to the transport
// - Timeout is the only limit enforced here

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Raw response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| AppError::Payload(format!("Invalid JSON body: {}", e)))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue one GET. Transport failures are errors; HTTP error statuses are not.
    async fn get(&self, url: &str, headers: &[(String, String)]) -> AppResult<HttpResponse>;
}

/// Production transport backed by reqwest
pub struct ReqwestHttpClient {
    http_client: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    fn header_map(headers: &[(String, String)]) -> AppResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AppError::Validation(format!("Invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| AppError::Validation(format!("Invalid value for header '{}': {}", name, e)))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> AppResult<HttpResponse> {
        let response = self
            .http_client
            .get(url)
            .headers(Self::header_map(headers)?)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Http(format!("Failed to read body from {}: {}", url, e)))?;

        Ok(HttpResponse { status, body })
    }
}
