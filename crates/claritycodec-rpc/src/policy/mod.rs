//! Request policies applied by the HTTP client, in order:
//! ```text
//! Request → [RateLimiter] → [Transport] → (retryable failure) → [RetryPolicy] → Transport …
//! ```

pub mod rate_limiter;
pub mod retry;

pub use rate_limiter::{RateLimiter, RateLimiterConfig};
pub use retry::{RetryConfig, RetryPolicy};
