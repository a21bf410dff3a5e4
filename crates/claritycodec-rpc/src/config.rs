//! API client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::policy::{RateLimiterConfig, RetryConfig};

pub const DEFAULT_API_URL: &str = "https://api.mainnet.hiro.so";

/// Retry settings as they appear in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_max_retries() -> u32 { 3 }
fn default_initial_backoff_ms() -> u64 { 500 }
fn default_max_backoff_ms() -> u64 { 10_000 }

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Connection settings for a Stacks node / Hiro API endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `X-API-KEY` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request deadline; `0` disables it.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Outgoing call rate; `0` disables local throttling.
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,
    #[serde(default)]
    pub retry: RetrySettings,
}

fn default_base_url() -> String { DEFAULT_API_URL.to_string() }
fn default_timeout_ms() -> u64 { 30_000 }
fn default_requests_per_second() -> f64 { 2.0 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            requests_per_second: default_requests_per_second(),
            retry: RetrySettings::default(),
        }
    }
}

impl ApiConfig {
    /// Apply `STACKS_API_URL` / `STACKS_API_KEY` from the environment.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("STACKS_API_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(key) = std::env::var("STACKS_API_KEY") {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
        self
    }

    /// `None` when `timeout_ms` is 0.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.retry.max_retries,
            initial_backoff: Duration::from_millis(self.retry.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.retry.max_backoff_ms),
            ..RetryConfig::default()
        }
    }

    /// `None` when throttling is disabled.
    pub fn rate_limiter_config(&self) -> Option<RateLimiterConfig> {
        (self.requests_per_second > 0.0).then(|| RateLimiterConfig {
            capacity: 1.0,
            refill_rate: self.requests_per_second,
        })
    }
}
