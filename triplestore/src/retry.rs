//! Bounded retry of conflicting writes.

use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::config::StoreConfig;
use crate::error::Error;

/// Exponential backoff with jitter for retryable errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first.
    pub max_retries: u32,
    /// Backoff before the first retry. Doubles with each retry.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Never retry.
    pub const NONE: Self = Self {
        max_retries: 0,
        base_delay: Duration::ZERO,
    };

    #[must_use]
    pub const fn from_config(config: &StoreConfig) -> Self {
        Self {
            max_retries: config.max_write_retries,
            base_delay: config.retry_base_delay,
        }
    }

    /// Backoff before retry number `retry` (0-based), without jitter.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry.min(16)))
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// runs out of retries. The last error is returned.
    pub fn run<T, F>(&self, what: &str, mut op: F) -> Result<T, Error>
    where
        F: FnMut() -> Result<T, Error>,
    {
        let mut retry = 0;
        loop {
            match op() {
                Err(e) if e.is_retryable() && retry < self.max_retries => {
                    let delay = with_jitter(self.backoff(retry));
                    retry += 1;
                    tracing::warn!(
                        "{what} failed with {e}, retry {retry}/{} in {delay:?}",
                        self.max_retries
                    );
                    thread::sleep(delay);
                }
                result => return result,
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}

/// Add up to `delay` of random jitter.
fn with_jitter(delay: Duration) -> Duration {
    let max_jitter = u64::try_from(delay.as_micros()).unwrap_or(u64::MAX);
    if max_jitter == 0 {
        return delay;
    }
    let jitter = rand::rng().random_range(0..=max_jitter);
    delay.saturating_add(Duration::from_micros(jitter))
}
