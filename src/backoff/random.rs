//! # Random delay.
//!
//! [`RandomDelay`] draws a fresh wait from `[min, max]` on every call. On its own
//! it spreads retries of many callers; combined with
//! [`plus`](crate::BackoffExt::plus) it adds jitter on top of another policy.
//!
//! Unlike the other policies it is not a pure function of the context.

use rand::Rng;
use std::time::Duration;

use crate::{backoff::BackoffPolicy, context::Context, error::ConfigError};

/// Uniform random wait in `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomDelay {
    min: Duration,
    max: Duration,
}

impl RandomDelay {
    /// Creates the policy; fails when `min > max`.
    pub fn new(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::EmptyRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> Duration {
        self.max
    }
}

impl BackoffPolicy for RandomDelay {
    fn backoff(&self, _ctx: &Context<'_>) -> Duration {
        draw(self.min, self.max)
    }
}

/// Uniform draw from `min..=max`, validating the range.
pub(crate) fn uniform(min: Duration, max: Duration) -> Result<Duration, ConfigError> {
    if min > max {
        return Err(ConfigError::EmptyRange { min, max });
    }
    Ok(draw(min, max))
}

/// Nanosecond resolution; callers guarantee `min <= max`.
fn draw(min: Duration, max: Duration) -> Duration {
    if min == max {
        return min;
    }
    let lo = min.as_nanos();
    let hi = max.as_nanos();
    let nanos = rand::rng().random_range(lo..=hi);
    let secs = (nanos / 1_000_000_000) as u64;
    let subsec = (nanos % 1_000_000_000) as u32;
    Duration::new(secs, subsec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestError, ctx_at};

    #[test]
    fn test_random_delay_bounds() {
        let err = TestError::Io;
        let ctx = ctx_at(1, Duration::ZERO, &err);
        let policy = RandomDelay::new(Duration::from_millis(500), Duration::from_millis(1000))
            .expect("valid range");
        for _ in 0..200 {
            let delay = policy.backoff(&ctx);
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1000));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let err = TestError::Io;
        let ctx = ctx_at(1, Duration::ZERO, &err);
        let policy = RandomDelay::new(Duration::from_secs(1), Duration::from_secs(1)).expect("valid range");
        assert_eq!(policy.backoff(&ctx), Duration::from_secs(1));
    }

    #[test]
    fn test_rejects_inverted_range() {
        assert_eq!(
            RandomDelay::new(Duration::from_secs(2), Duration::from_secs(1)),
            Err(ConfigError::EmptyRange {
                min: Duration::from_secs(2),
                max: Duration::from_secs(1),
            })
        );
    }

    #[test]
    fn test_draw_near_duration_max() {
        let delay = draw(Duration::MAX - Duration::from_secs(1), Duration::MAX);
        assert!(delay >= Duration::MAX - Duration::from_secs(1));
    }
}
