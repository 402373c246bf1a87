//! Soft rate limiting for outgoing API calls
//!
//! A single process-wide limiter enforces a minimum wall-clock interval
//! between requests to the remote statistics host. Callers block (sleep)
//! inside `acquire` when invoked too soon after the previous call; bursts of
//! concurrent fetches therefore degrade to sequential network calls spaced
//! by the interval.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Enforces a minimum interval between consecutive `acquire` returns
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter with the given minimum spacing between requests
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Blocks until at least the minimum interval has elapsed since the last
    /// acquire, then stamps now as the new last-request time.
    ///
    /// The lock is held across the sleep so concurrent callers serialize in
    /// lock-acquisition order.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(?wait, "rate limit: delaying request");
                sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}
