//! Token bucket rate limiter.
//!
//! Tokens accrue at `refill_rate` per second up to `capacity`; each call
//! spends one. Public Stacks API endpoints throttle aggressively, so the
//! client paces itself instead of waiting for 429s.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum tokens in the bucket (burst size).
    pub capacity: f64,
    /// Tokens per second. Must be positive.
    pub refill_rate: f64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            capacity: 1.0,
            refill_rate: 2.0,
        }
    }
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Thread-safe token bucket.
pub struct RateLimiter {
    config: RateLimiterConfig,
    state: Mutex<BucketState>,
}

impl RateLimiter {
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            state: Mutex::new(BucketState {
                tokens: config.capacity,
                last_refill: Instant::now(),
            }),
            config,
        }
    }

    /// Take one token if available.
    pub fn try_acquire(&self) -> bool {
        let mut state = self.lock();
        self.refill(&mut state);
        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Estimated wait before one token is available.
    pub fn wait_time(&self) -> Duration {
        let mut state = self.lock();
        self.refill(&mut state);
        let deficit = 1.0 - state.tokens;
        if deficit <= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(deficit / self.config.refill_rate)
        }
    }

    /// Wait until a token is available, then take it.
    pub async fn acquire(&self) {
        while !self.try_acquire() {
            let wait = self.wait_time();
            tracing::debug!(wait_ms = wait.as_millis() as u64, "rate limited, backing off");
            tokio::time::sleep(wait).await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, BucketState> {
        // The state is two plain numbers; a panic mid-update cannot leave it torn.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn refill(&self, state: &mut BucketState) {
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();
        state.tokens = (state.tokens + elapsed * self.config.refill_rate).min(self.config.capacity);
        state.last_refill = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_within_capacity() {
        let rl = RateLimiter::new(RateLimiterConfig {
            capacity: 5.0,
            refill_rate: 0.0001,
        });
        for _ in 0..5 {
            assert!(rl.try_acquire());
        }
        assert!(!rl.try_acquire(), "bucket should be empty");
    }

    #[test]
    fn wait_time_when_empty() {
        let rl = RateLimiter::new(RateLimiterConfig {
            capacity: 1.0,
            refill_rate: 10.0,
        });
        assert!(rl.try_acquire());
        let wait = rl.wait_time();
        // ~100ms for one token at 10/s
        assert!(
            wait.as_millis() >= 50 && wait.as_millis() <= 110,
            "unexpected wait time: {wait:?}"
        );
    }

    #[tokio::test]
    async fn acquire_waits_for_refill() {
        let rl = RateLimiter::new(RateLimiterConfig {
            capacity: 1.0,
            refill_rate: 50.0,
        });
        rl.acquire().await;
        let start = Instant::now();
        rl.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
