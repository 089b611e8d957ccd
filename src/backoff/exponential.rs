//! # Exponential backoff.
//!
//! [`Exponential`] doubles the wait after every failure, starting at `init` and
//! capped at `max`:
//!
//! ```text
//! init=1ms max=5ms
//!   attempt_count: 1    2    3    4    5 …
//!   backoff:       1ms  2ms  4ms  5ms  5ms
//! ```
//!
//! Doubling is overflow-safe: once it would overflow the value pins to
//! [`Duration::MAX`] and stops, and the loop also stops as soon as the running
//! value passes `max`. The result is monotonic in the attempt count, bounded by
//! `max`, and cheap for any attempt count.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{BackoffPolicy, Context, Exponential};
//!
//! let backoff = Exponential::new(Duration::from_millis(100), Duration::from_secs(10));
//! let err = std::io::Error::other("boom");
//! let start = std::time::Instant::now();
//!
//! assert_eq!(backoff.backoff(&Context::new(start, start, 1, &err)), Duration::from_millis(100));
//! assert_eq!(backoff.backoff(&Context::new(start, start, 2, &err)), Duration::from_millis(200));
//! assert_eq!(backoff.backoff(&Context::new(start, start, 20, &err)), Duration::from_secs(10));
//! ```

use std::time::Duration;

use crate::{
    backoff::{BackoffPolicy, random::uniform},
    context::Context,
    error::ConfigError,
};

/// Doubling backoff with an upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exponential {
    init: Duration,
    max: Duration,
}

impl Default for Exponential {
    /// Returns a policy with:
    /// - `init = 100ms`;
    /// - `max = 30s`.
    fn default() -> Self {
        Self {
            init: Duration::from_millis(100),
            max: Duration::from_secs(30),
        }
    }
}

impl Exponential {
    /// Creates the policy. An `init` above `max` is clamped at evaluation time.
    pub const fn new(init: Duration, max: Duration) -> Self {
        Self { init, max }
    }

    /// Creates the policy with `init` drawn once, uniformly, from `min_init..=max_init`.
    ///
    /// Spreads the first retries of many callers that were built at the same time.
    pub fn randomized(
        min_init: Duration,
        max_init: Duration,
        max: Duration,
    ) -> Result<Self, ConfigError> {
        let init = uniform(min_init, max_init)?;
        Ok(Self::new(init, max))
    }

    /// The initial interval.
    pub fn init(&self) -> Duration {
        self.init
    }

    /// The cap.
    pub fn max(&self) -> Duration {
        self.max
    }
}

impl BackoffPolicy for Exponential {
    fn backoff(&self, ctx: &Context<'_>) -> Duration {
        let mut value = self.init;
        for _ in 1..ctx.attempt_count() {
            if value > self.max {
                break;
            }
            match value.checked_mul(2) {
                Some(doubled) => value = doubled,
                None => {
                    value = Duration::MAX;
                    break;
                }
            }
        }
        value.min(self.max)
    }
}
