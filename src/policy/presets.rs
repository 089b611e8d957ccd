//! # Frozen policies.
//!
//! Ready-made policies built once on first use and never mutated afterwards.
//!
//! - [`NONE`]: never retries; the first failure is returned as is.
//! - [`ALWAYS`]: retries every recoverable failure (anything outside
//!   [`KindIn::unrecoverable`](crate::KindIn::unrecoverable)) with the default
//!   exponential backoff, for as long as it takes.

use std::sync::LazyLock;

use crate::{
    backoff::{Exponential, NoBackoff},
    conditions::{Always, Never},
    policy::RetryPolicy,
};

/// Policy that never retries.
pub static NONE: LazyLock<RetryPolicy> =
    LazyLock::new(|| RetryPolicy::builder().with_retry_condition(Never).with_backoff(NoBackoff).build());

/// Policy that retries every recoverable failure without limit.
pub static ALWAYS: LazyLock<RetryPolicy> = LazyLock::new(|| {
    RetryPolicy::builder()
        .with_retry_condition(Always)
        .with_backoff(Exponential::default())
        .build()
});

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::conditions::Condition;
    use crate::testing::{TestError, ctx_at};

    #[test]
    fn test_none_never_allows() {
        let err = TestError::Io;
        assert!(!NONE.condition().check(&ctx_at(1, Duration::ZERO, &err)));
        assert_eq!(NONE.condition().to_string(), "!(failure.kind in [cancelled, defect, fatal]) && (false)");
    }

    #[test]
    fn test_always_allows_recoverable_only() {
        let io = TestError::Io;
        let bug = TestError::Bug(1);
        let cancelled = TestError::Cancelled;
        assert!(ALWAYS.condition().check(&ctx_at(10_000, Duration::from_secs(86_400), &io)));
        assert!(!ALWAYS.condition().check(&ctx_at(1, Duration::ZERO, &bug)));
        assert!(!ALWAYS.condition().check(&ctx_at(1, Duration::ZERO, &cancelled)));
    }

    #[test]
    fn test_none_call_runs_once() {
        let mut calls = 0;
        let err = NONE
            .call("once", || -> Result<(), TestError> {
                calls += 1;
                Err(TestError::Timeout)
            })
            .unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(err.into_failure(), Some(TestError::Timeout));
    }
}
