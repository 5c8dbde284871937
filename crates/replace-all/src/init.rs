//! Waiting for the match source to become available.
//!
//! Hosts often create their search facility lazily. [`wait_until_ready`] polls a probe at a fixed
//! interval for a bounded number of retries; the sleeper is injected so tests run without timers.

use crate::error::ReplaceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed-interval, bounded retry schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Delay between probes, in milliseconds.
    pub interval_ms: u64,
    /// Probes after the first one before giving up.
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            max_retries: 21,
        }
    }
}

impl RetryPolicy {
    /// Delay between probes.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Upper bound on the number of probes.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Blocks between probes.
pub trait Sleeper {
    /// Wait for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<F: FnMut(Duration)> Sleeper for F {
    fn sleep(&mut self, duration: Duration) {
        self(duration)
    }
}

/// Poll `probe` until it yields a handle.
///
/// The probe runs at most [`RetryPolicy::max_attempts`] times with one sleep between consecutive
/// probes. Gives up with [`ReplaceError::InitializationTimeout`].
pub fn wait_until_ready<T, S, P>(
    policy: RetryPolicy,
    sleeper: &mut S,
    mut probe: P,
) -> Result<T, ReplaceError>
where
    S: Sleeper + ?Sized,
    P: FnMut() -> Option<T>,
{
    let max_attempts = policy.max_attempts();
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        if let Some(ready) = probe() {
            debug!(attempts, "match source ready");
            return Ok(ready);
        }

        if attempts >= max_attempts {
            warn!(attempts, "match source never became available");
            return Err(ReplaceError::InitializationTimeout { attempts });
        }

        sleeper.sleep(policy.interval());
    }
}
