//! # Failure context.
//!
//! A [`Context`] is an immutable snapshot of one failed attempt. It is built right
//! after the work fails, handed by reference to the condition, the backoff policy
//! and every listener for that single decision, then dropped.
//!
//! Time is read from the snapshot, never from the wall clock, so evaluating the
//! same context twice gives the same answer.

use std::time::{Duration, Instant};

use crate::failure::Failure;

/// Snapshot of one failure occurrence.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    start: Instant,
    now: Instant,
    attempt_count: u32,
    failure: &'a dyn Failure,
}

impl<'a> Context<'a> {
    /// Creates a context.
    ///
    /// ### Parameters
    /// - `start`: when the overall invocation began
    /// - `now`: when this failure was observed
    /// - `attempt_count`: attempts made so far, the failing one included
    /// - `failure`: the error the attempt produced
    pub fn new(start: Instant, now: Instant, attempt_count: u32, failure: &'a dyn Failure) -> Self {
        Self {
            start,
            now,
            attempt_count,
            failure,
        }
    }

    /// Instant the overall invocation began.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Instant the failure was observed.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Number of attempts already made (first failure sees `1`).
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// The captured failure.
    pub fn failure(&self) -> &'a dyn Failure {
        self.failure
    }

    /// Time spent since the invocation began; never negative.
    pub fn elapsed(&self) -> Duration {
        self.now.saturating_duration_since(self.start)
    }

    /// Same context, re-stamped at `now`.
    pub(crate) fn restamped(&self, now: Instant) -> Self {
        Self { now, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestError;

    #[test]
    fn test_elapsed_is_difference() {
        let start = Instant::now();
        let err = TestError::Io;
        let ctx = Context::new(start, start + Duration::from_millis(2500), 3, &err);

        assert_eq!(ctx.elapsed(), Duration::from_millis(2500));
        assert_eq!(ctx.attempt_count(), 3);
        assert_eq!(ctx.failure().to_string(), "io failure");
    }

    #[test]
    fn test_elapsed_never_negative() {
        let now = Instant::now();
        let err = TestError::Io;
        let ctx = Context::new(now + Duration::from_secs(1), now, 1, &err);

        assert_eq!(ctx.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_restamped_keeps_attempts() {
        let start = Instant::now();
        let err = TestError::Io;
        let ctx = Context::new(start, start, 2, &err);
        let later = ctx.restamped(start + Duration::from_secs(4));

        assert_eq!(later.attempt_count(), 2);
        assert_eq!(later.elapsed(), Duration::from_secs(4));
    }
}
