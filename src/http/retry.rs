//! Retry policies for HTTP requests.
//!
//! Order creation and cancellation are never retried: a lost response could
//! otherwise create a duplicate order. Reads use [`RetryPolicy::Idempotent`].

use rand::Rng;
use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    #[default]
    None,
    /// Retry on transport failures, 408/429 and 502/503/504 with backoff.
    Idempotent,
    /// Caller-supplied retry settings.
    Custom(RetryConfig),
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Delay multiplier per attempt.
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Settings used for order listing, lookup and health checks.
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    /// Wait requested by a `Retry-After` header, capped at `max_delay`.
    pub fn retry_after_delay(&self, retry_after_ms: u64) -> Duration {
        Duration::from_millis(retry_after_ms).min(self.max_delay)
    }

    /// Delay before retry number `attempt + 1` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_ms =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped_ms = base_ms.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter && capped_ms > 0.0 {
            let spread = capped_ms * 0.25;
            (capped_ms + rand::thread_rng().gen_range(-spread..=spread)).max(0.0)
        } else {
            capped_ms
        };

        Duration::from_millis(final_ms as u64)
    }
}
