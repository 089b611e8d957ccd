//! # Fixed backoffs.
//!
//! - [`FixedDelay`] waits the same amount after every failure.
//! - [`FixedInterval`] keeps attempts on a grid anchored at the invocation start:
//!
//! ```text
//! interval = 1s
//!   attempt 1 ──fail@0.2s──► wait 0.8s ──► attempt 2 starts at 1s
//!   attempt 2 ──fail@2.5s──► wait 0s   ──► attempt 3 starts at 2.5s (late, no extra wait)
//!   attempt 3 ──fail@2.6s──► wait 0.4s ──► attempt 4 starts at 3s
//! ```
//!
//! A slow attempt never adds latency on top of itself; a fast one waits out the
//! remainder of its slot.

use std::time::Duration;

use crate::{backoff::BackoffPolicy, context::Context};

/// Constant wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Creates the policy.
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Convenience for whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// The configured wait.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl BackoffPolicy for FixedDelay {
    fn backoff(&self, _ctx: &Context<'_>) -> Duration {
        self.delay
    }
}

/// Schedule-aligned wait: the n-th failure waits until `n × interval` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    /// Creates the policy.
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// The slot length.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl BackoffPolicy for FixedInterval {
    fn backoff(&self, ctx: &Context<'_>) -> Duration {
        let target = self.interval.saturating_mul(ctx.attempt_count());
        target.saturating_sub(ctx.elapsed())
    }
}
