//! Minimum-interval call spacing.
//!
//! An explicit object owned by whichever client needs it, replacing
//! the usual ad-hoc timestamp table. One [`Throttle`] guards one
//! upstream endpoint.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Spaces calls so that consecutive [`wait`](Self::wait) returns are
/// at least `min_interval` apart.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    /// Creates a throttle with the given minimum spacing.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: Mutex::new(None),
        }
    }

    /// Sleeps until the minimum interval since the previous call has
    /// elapsed, then records this call.
    pub async fn wait(&self) {
        let delay = {
            let mut last = self.last.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            let now = Instant::now();
            let delay = match *last {
                Some(prev) => (prev + self.min_interval).saturating_duration_since(now),
                None => Duration::ZERO,
            };
            *last = Some(now + delay);
            delay
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_call_is_immediate() {
        let throttle = Throttle::new(Duration::from_millis(100));
        let start = Instant::now();
        throttle.wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_consecutive_calls_are_spaced() {
        let throttle = Throttle::new(Duration::from_millis(40));
        let start = Instant::now();
        throttle.wait().await;
        throttle.wait().await;
        throttle.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(80));
    }
}
