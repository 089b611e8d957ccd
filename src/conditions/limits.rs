//! # Budget conditions.
//!
//! - [`MaxAttempts`] allows retrying while `attempt_count < amount`.
//! - [`MaxTimeElapsed`] allows retrying while `elapsed < duration`.
//!
//! Both validate their parameters at construction and fail with [`ConfigError`].

use std::fmt;
use std::time::Duration;

use crate::{conditions::Condition, context::Context, error::ConfigError};

/// Caps the total number of attempts.
///
/// With `amount = 3` the work runs at most three times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxAttempts {
    amount: u32,
}

impl MaxAttempts {
    /// Three attempts, the builder default.
    pub const DEFAULT: Self = Self { amount: 3 };

    /// Creates the condition; `amount` must be greater than 1.
    pub fn new(amount: u32) -> Result<Self, ConfigError> {
        if amount <= 1 {
            return Err(ConfigError::MaxAttempts { amount });
        }
        Ok(Self { amount })
    }

    /// The attempt cap.
    pub fn amount(&self) -> u32 {
        self.amount
    }
}

impl fmt::Display for MaxAttempts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attempt_count < {}", self.amount)
    }
}

impl Condition for MaxAttempts {
    fn check(&self, ctx: &Context<'_>) -> bool {
        ctx.attempt_count() < self.amount
    }

    fn describe(&self, ctx: &Context<'_>) -> String {
        format!("attempt_count={} < {}", ctx.attempt_count(), self.amount)
    }
}

/// Caps the wall time spent on one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxTimeElapsed {
    duration: Duration,
}

impl MaxTimeElapsed {
    /// Creates the condition; `duration` must be positive.
    pub fn new(duration: Duration) -> Result<Self, ConfigError> {
        if duration.is_zero() {
            return Err(ConfigError::MaxTimeElapsed { duration });
        }
        Ok(Self { duration })
    }

    /// Convenience for whole seconds.
    pub fn from_secs(secs: u64) -> Result<Self, ConfigError> {
        Self::new(Duration::from_secs(secs))
    }

    /// The time budget.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for MaxTimeElapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elapsed < {:?}", self.duration)
    }
}

impl Condition for MaxTimeElapsed {
    fn check(&self, ctx: &Context<'_>) -> bool {
        ctx.elapsed() < self.duration
    }

    fn describe(&self, ctx: &Context<'_>) -> String {
        format!("elapsed={:?} < {:?}", ctx.elapsed(), self.duration)
    }
}
