//! # Plain retry configuration.
//!
//! [`Config`] describes a policy with plain values, for callers that load their
//! settings from files or the environment. Zero means "no limit" for both budgets.
//! Turn it into a policy with [`RetryPolicy::from_config`](crate::RetryPolicy::from_config).
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use retryvisor::{Config, RetryPolicy};
//!
//! let mut cfg = Config::default();
//! cfg.max_attempts = 5;
//! cfg.max_elapsed = Duration::from_secs(30);
//! cfg.initial_backoff = Duration::from_millis(50);
//!
//! let policy = RetryPolicy::from_config(&cfg)?;
//! assert_eq!(
//!     policy.retry_condition().to_string(),
//!     "attempt_count < 5 && (elapsed < 30s)"
//! );
//! # Ok::<(), retryvisor::ConfigError>(())
//! ```

use std::time::Duration;

use crate::{
    conditions::{Always, ConditionExt, ConditionRef, MaxAttempts, MaxTimeElapsed},
    error::ConfigError,
};

/// Retry settings as plain values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of attempts, the first one included (0 = unlimited).
    pub max_attempts: u32,
    /// Maximum time spent on one invocation (0 = unlimited).
    pub max_elapsed: Duration,
    /// First exponential backoff.
    pub initial_backoff: Duration,
    /// Exponential backoff cap.
    pub max_backoff: Duration,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `max_attempts = 3`
    /// - `max_elapsed = 0s` (unlimited)
    /// - `initial_backoff = 100ms`
    /// - `max_backoff = 30s`
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_elapsed: Duration::ZERO,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Returns the attempt limit, or `None` when unlimited.
    pub fn attempts_limit(&self) -> Option<u32> {
        (self.max_attempts != 0).then_some(self.max_attempts)
    }

    /// Returns the time budget, or `None` when unlimited.
    pub fn elapsed_limit(&self) -> Option<Duration> {
        (!self.max_elapsed.is_zero()).then_some(self.max_elapsed)
    }

    /// Builds the retry condition these limits describe.
    pub(crate) fn retry_condition(&self) -> Result<ConditionRef, ConfigError> {
        let attempts = self.attempts_limit().map(MaxAttempts::new).transpose()?;
        let elapsed = self.elapsed_limit().map(MaxTimeElapsed::new).transpose()?;
        Ok(match (attempts, elapsed) {
            (Some(a), Some(e)) => a.and(e).into_ref(),
            (Some(a), None) => a.into_ref(),
            (None, Some(e)) => e.into_ref(),
            (None, None) => Always.into_ref(),
        })
    }
}
