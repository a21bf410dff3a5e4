//! HTTP read-only call client backed by `reqwest`.
//!
//! Features:
//! - Token-bucket pacing before every request
//! - Automatic retry with exponential backoff for transient errors
//! - Optional `X-API-KEY` authentication

use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::policy::{RateLimiter, RetryPolicy};
use crate::request::{CallReadRequest, CallReadResponse};
use crate::transport::ReadOnlyTransport;

/// HTTP client for `/v2/contracts/call-read`.
pub struct HttpReadOnlyClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
    retry: RetryPolicy,
    rate_limiter: Option<RateLimiter>,
    timeout_ms: u64,
}

impl HttpReadOnlyClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ClientError::Http(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
            retry: RetryPolicy::new(config.retry_config()),
            rate_limiter: config.rate_limiter_config().map(RateLimiter::new),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Client with default settings for `base_url`.
    pub fn default_for(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    pub fn endpoint(&self, req: &CallReadRequest) -> String {
        format!("{}{}", self.base_url, req.path())
    }

    async fn send_once(&self, req: &CallReadRequest) -> Result<CallReadResponse, ClientError> {
        let body = req.body()?;
        let mut builder = self.http.post(self.endpoint(req)).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.header("X-API-KEY", key);
        }

        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited {
                endpoint: self.endpoint(req),
            });
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let text = resp.text().await.map_err(|e| self.transport_error(e))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout {
                ms: self.timeout_ms,
            }
        } else {
            ClientError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl ReadOnlyTransport for HttpReadOnlyClient {
    async fn call_read(&self, req: &CallReadRequest) -> Result<CallReadResponse, ClientError> {
        let mut attempt = 0u32;
        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.acquire().await;
            }

            tracing::debug!(
                contract = %req.contract,
                function = %req.function,
                args = req.arguments.len(),
                "call-read"
            );

            match self.send_once(req).await {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_retryable() => {
                    attempt += 1;
                    match self.retry.next_delay(attempt) {
                        Some(delay) => {
                            tracing::warn!(
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                error = %e,
                                function = %req.function,
                                "retrying call-read"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            tracing::error!(
                                attempt,
                                error = %e,
                                url = %self.base_url,
                                "max retries exceeded"
                            );
                            return Err(e);
                        }
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn url(&self) -> &str {
        &self.base_url
    }
}
