//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - throttles public form submissions.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if a request from `key` is allowed and record it.
    async fn check(&self, key: &str) -> RateLimitResult;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Time until the next request from this key would be admitted.
    pub reset_after: Duration,
}
