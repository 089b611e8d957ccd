//! # Failure-kind filter.
//!
//! [`KindIn`] matches when the failure's kind equals one of the registered kinds,
//! or descends from one of them:
//!
//! ```text
//! registered: [IO]
//!   IO         → match (exact)
//!   TIMEOUT    → match (IO/timeout)
//!   DEFECT     → no match
//! ```
//!
//! [`KindIn::unrecoverable`] is the default abort condition: cancellation,
//! programming defects and fatal errors are never retried.

use std::fmt;

use crate::{conditions::Condition, context::Context, failure::FailureKind};

/// Matches failures whose kind is (a subkind of) one of the registered kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindIn {
    kinds: Vec<&'static FailureKind>,
}

impl KindIn {
    /// Creates the filter; duplicates are ignored.
    pub fn new(kinds: impl IntoIterator<Item = &'static FailureKind>) -> Self {
        let mut unique: Vec<&'static FailureKind> = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Self { kinds: unique }
    }

    /// Cancellation, defects and fatal errors.
    pub fn unrecoverable() -> Self {
        Self::new([
            &FailureKind::CANCELLED,
            &FailureKind::DEFECT,
            &FailureKind::FATAL,
        ])
    }

    /// The registered kinds.
    pub fn kinds(&self) -> &[&'static FailureKind] {
        &self.kinds
    }

    fn names(&self) -> String {
        let names: Vec<&str> = self.kinds.iter().map(|k| k.name()).collect();
        names.join(", ")
    }

    fn matches(&self, kind: &FailureKind) -> bool {
        self.kinds.iter().any(|k| *k == kind) || self.kinds.iter().any(|k| kind.is_a(k))
    }
}

impl fmt::Display for KindIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failure.kind in [{}]", self.names())
    }
}

impl Condition for KindIn {
    fn check(&self, ctx: &Context<'_>) -> bool {
        self.matches(ctx.failure().kind())
    }

    fn describe(&self, ctx: &Context<'_>) -> String {
        format!(
            "failure.kind={} ({}) in [{}]",
            ctx.failure().kind(),
            ctx.failure(),
            self.names()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{TestError, ctx_at};

    #[test]
    fn test_exact_and_subkind_match() {
        let io = KindIn::new([&FailureKind::IO]);

        let err = TestError::Io;
        assert!(io.check(&ctx_at(1, Duration::ZERO, &err)));
        let err = TestError::Timeout;
        assert!(io.check(&ctx_at(1, Duration::ZERO, &err)));
        let err = TestError::Bug(1);
        assert!(!io.check(&ctx_at(1, Duration::ZERO, &err)));
    }

    #[test]
    fn test_subkind_filter_does_not_match_parent() {
        let timeout = KindIn::new([&FailureKind::TIMEOUT]);
        let err = TestError::Io;
        assert!(!timeout.check(&ctx_at(1, Duration::ZERO, &err)));
    }

    #[test]
    fn test_unrecoverable() {
        let abort = KindIn::unrecoverable();
        for (err, expected) in [
            (TestError::Bug(7), true),
            (TestError::Cancelled, true),
            (TestError::Io, false),
            (TestError::Timeout, false),
        ] {
            assert_eq!(abort.check(&ctx_at(1, Duration::ZERO, &err)), expected, "{err:?}");
        }
    }

    #[test]
    fn test_duplicates_collapse() {
        let cond = KindIn::new([&FailureKind::IO, &FailureKind::IO, &FailureKind::FATAL]);
        assert_eq!(cond.kinds().len(), 2);
        assert_eq!(cond.to_string(), "failure.kind in [io, fatal]");
    }

    #[test]
    fn test_describe_shows_failure() {
        let cond = KindIn::new([&FailureKind::IO]);
        let err = TestError::Timeout;
        assert_eq!(
            cond.describe(&ctx_at(1, Duration::ZERO, &err)),
            "failure.kind=io/timeout (timed out) in [io]"
        );
    }
}
