//! Fixed inter-request pause for polite screening.

use std::time::Duration;
use tracing::debug;

/// Sleeps a fixed delay between consecutive queries.
///
/// Not adaptive: no backoff and no retry, the same pause after every query
/// except the last one in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a pause follows query `index` (0-based) out of `total`.
    pub fn should_pause(&self, index: usize, total: usize) -> bool {
        !self.delay.is_zero() && index + 1 < total
    }

    /// Pause after query `index` unless it was the last one.
    pub async fn pause_after(&self, index: usize, total: usize) {
        if self.should_pause(index, total) {
            debug!(delay_ms = self.delay.as_millis() as u64, "pausing before next query");
            tokio::time::sleep(self.delay).await;
        }
    }
}
