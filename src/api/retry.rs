//! Bounded retry with exponential backoff
//!
//! Wraps a single remote call in up to three attempts, sleeping
//! `min(max_delay, base * 2^(n-1))` between attempt n and n+1. After the
//! final attempt the last error is returned unchanged; retry never swallows
//! a failure. Every error kind is eligible: transient network errors and
//! malformed responses are treated identically.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Retry schedule: attempt count plus capped exponential backoff
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each retry
    pub base_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A policy with near-zero delays for tests that drive real failures
    pub fn immediate() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
        }
    }

    /// Runs `op` until it succeeds or attempts are exhausted.
    ///
    /// The closure is invoked once per attempt; the error from the final
    /// attempt propagates to the caller.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut delay = self.base_delay;
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= self.max_attempts.max(1) => return Err(err),
                Err(_) => {
                    sleep(delay).await;
                    delay = (delay * 2).min(self.max_delay);
                    attempt += 1;
                }
            }
        }
    }
}
