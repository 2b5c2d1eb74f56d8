//! Token-bucket limiter pacing outbound verification calls.
//!
//! The bucket is tracked as a single "theoretical arrival time" (GCRA): each
//! granted token pushes it forward by one refill interval, and a caller may
//! proceed while it sits no more than `capacity - 1` intervals in the future.
//! This is equivalent to a bucket of `capacity` tokens refilled one per
//! interval, with exact `Duration` arithmetic.

#[cfg(test)]
mod tests;

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Longest refill interval a bucket will use; larger values are clamped.
pub const MAX_REFILL_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
pub struct TokenBucket {
    capacity: u32,
    refill_interval: Duration,
    arrival: Mutex<Instant>,
}

impl TokenBucket {
    /// `capacity` is clamped to at least 1 and `refill_interval` to at most
    /// [`MAX_REFILL_INTERVAL`]. A zero interval never waits.
    pub fn new(capacity: u32, refill_interval: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            refill_interval: refill_interval.min(MAX_REFILL_INTERVAL),
            arrival: Mutex::new(Instant::now()),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn is_unlimited(&self) -> bool {
        self.refill_interval.is_zero()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn refill_interval(&self) -> Duration {
        self.refill_interval
    }

    fn burst_allowance(&self) -> Duration {
        self.refill_interval
            .checked_mul(self.capacity - 1)
            .unwrap_or(Duration::MAX)
    }

    /// Takes a token if one is available now; otherwise returns how long to wait.
    fn try_take(&self, now: Instant) -> Result<(), Duration> {
        let mut arrival = self.arrival.lock();
        let tat = (*arrival).max(now);
        let allowance = self.burst_allowance();
        let ahead = tat - now;

        if ahead <= allowance {
            *arrival = tat + self.refill_interval;
            Ok(())
        } else {
            Err(ahead - allowance)
        }
    }

    /// Non-blocking variant of [`acquire`](Self::acquire).
    pub fn try_acquire(&self) -> bool {
        self.is_unlimited() || self.try_take(Instant::now()).is_ok()
    }

    /// Waits until a token is available and takes it.
    pub async fn acquire(&self) {
        if self.is_unlimited() {
            return;
        }

        loop {
            match self.try_take(Instant::now()) {
                Ok(()) => return,
                Err(wait) => {
                    debug!(wait_ms = wait.as_millis() as u64, "Rate limited; waiting");
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

impl Default for TokenBucket {
    fn default() -> Self {
        Self::unlimited()
    }
}
