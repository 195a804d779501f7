//! Token bucket rate limiter.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Simple in-memory token bucket rate limiter.
#[derive(Debug)]
pub struct RateLimiter {
    /// Client key → bucket state.
    buckets: Mutex<HashMap<String, TokenBucket>>,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(max_tokens: u32, refill_rate: f64) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            max_tokens,
            refill_rate,
        }
    }

    /// Attempts to consume a token for the given key.
    pub async fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();

        let bucket = buckets.entry(key.to_string()).or_insert(TokenBucket {
            tokens: self.max_tokens as f64,
            last_refill: now,
        });

        // Refill tokens
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate).min(self.max_tokens as f64);
        bucket.last_refill = now;

        // Try to consume
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Removes buckets untouched for longer than `max_idle`. Returns the
    /// number of buckets removed.
    pub async fn prune_stale(&self, max_idle: Duration) -> usize {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();
        let before = buckets.len();
        buckets.retain(|_, bucket| now.duration_since(bucket.last_refill) <= max_idle);
        before - buckets.len()
    }

    /// Number of currently tracked client buckets.
    pub async fn bucket_count(&self) -> usize {
        let buckets = self.buckets.lock().await;
        buckets.len()
    }

    /// The configured burst capacity.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// The configured refill rate per second.
    pub fn refill_rate(&self) -> f64 {
        self.refill_rate
    }
}
