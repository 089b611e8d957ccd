//! # Condition trait and combinators.
//!
//! A [`Condition`] answers "keep retrying?" for one [`Context`]. Conditions are
//! pure: they read time and attempt counts from the context only.
//!
//! Composition:
//! ```text
//! effective = NOT abort AND retry
//!              │          └─ evaluated only when the left side is true
//!              └─ evaluated first
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{ConditionExt, KindIn, MaxAttempts, MaxTimeElapsed};
//!
//! let retry = MaxAttempts::new(5)?.and(MaxTimeElapsed::new(Duration::from_secs(30))?);
//! let effective = KindIn::unrecoverable().not().and(retry);
//! assert_eq!(
//!     effective.to_string(),
//!     "!(failure.kind in [cancelled, defect, fatal]) && \
//!      (attempt_count < 5 && (elapsed < 30s))"
//! );
//! # Ok::<(), retryvisor::ConfigError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::context::Context;

/// Shared condition handle.
pub type ConditionRef = Arc<dyn Condition>;

/// Predicate deciding whether a failed invocation may be retried.
pub trait Condition: fmt::Display + Send + Sync + 'static {
    /// Returns `true` while retrying is allowed.
    fn check(&self, ctx: &Context<'_>) -> bool;

    /// Renders the evaluated decision for diagnostics (values filled in from `ctx`).
    fn describe(&self, ctx: &Context<'_>) -> String {
        let _ = ctx;
        self.to_string()
    }
}

impl<C: Condition + ?Sized> Condition for Arc<C> {
    fn check(&self, ctx: &Context<'_>) -> bool {
        (**self).check(ctx)
    }

    fn describe(&self, ctx: &Context<'_>) -> String {
        (**self).describe(ctx)
    }
}

/// Combinators available on every condition.
pub trait ConditionExt: Condition + Sized {
    /// Logical negation.
    fn not(self) -> Not<Self> {
        Not(self)
    }

    /// Logical conjunction, left side first.
    fn and<C: Condition>(self, other: C) -> And<Self, C> {
        And(self, other)
    }

    /// Moves the condition behind a shared handle.
    fn into_ref(self) -> ConditionRef {
        Arc::new(self)
    }
}

impl<C: Condition> ConditionExt for C {}

/// Always allows retrying.
#[derive(Clone, Copy, Debug, Default)]
pub struct Always;

/// Never allows retrying.
#[derive(Clone, Copy, Debug, Default)]
pub struct Never;

/// Condition that is always `true`.
pub const TRUE: Always = Always;
/// Condition that is always `false`.
pub const FALSE: Never = Never;

impl fmt::Display for Always {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("true")
    }
}

impl Condition for Always {
    fn check(&self, _ctx: &Context<'_>) -> bool {
        true
    }
}

impl fmt::Display for Never {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("false")
    }
}

impl Condition for Never {
    fn check(&self, _ctx: &Context<'_>) -> bool {
        false
    }
}

/// Negation of a condition.
#[derive(Clone, Debug)]
pub struct Not<C>(pub C);

impl<C: Condition> fmt::Display for Not<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!({})", self.0)
    }
}

impl<C: Condition> Condition for Not<C> {
    fn check(&self, ctx: &Context<'_>) -> bool {
        !self.0.check(ctx)
    }

    fn describe(&self, ctx: &Context<'_>) -> String {
        format!("!({})", self.0.describe(ctx))
    }
}

/// Conjunction of two conditions.
#[derive(Clone, Debug)]
pub struct And<A, B>(pub A, pub B);

impl<A: Condition, B: Condition> fmt::Display for And<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} && ({})", self.0, self.1)
    }
}

impl<A: Condition, B: Condition> Condition for And<A, B> {
    fn check(&self, ctx: &Context<'_>) -> bool {
        self.0.check(ctx) && self.1.check(ctx)
    }

    fn describe(&self, ctx: &Context<'_>) -> String {
        format!("{} && ({})", self.0.describe(ctx), self.1.describe(ctx))
    }
}

/// Condition backed by a closure over the context.
///
/// The closure must be pure with respect to the context.
pub struct FnCondition<F> {
    label: &'static str,
    f: F,
}

impl<F> FnCondition<F>
where
    F: Fn(&Context<'_>) -> bool + Send + Sync + 'static,
{
    /// Creates a labelled closure condition.
    pub fn new(label: &'static str, f: F) -> Self {
        Self { label, f }
    }
}

impl<F> fmt::Display for FnCondition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

impl<F> Condition for FnCondition<F>
where
    F: Fn(&Context<'_>) -> bool + Send + Sync + 'static,
{
    fn check(&self, ctx: &Context<'_>) -> bool {
        (self.f)(ctx)
    }

    fn describe(&self, ctx: &Context<'_>) -> String {
        format!("{}={}", self.label, (self.f)(ctx))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::testing::{TestError, ctx_at};

    struct Counting(Arc<AtomicUsize>, bool);

    impl fmt::Display for Counting {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "counting({})", self.1)
        }
    }

    impl Condition for Counting {
        fn check(&self, _ctx: &Context<'_>) -> bool {
            self.0.fetch_add(1, Ordering::SeqCst);
            self.1
        }
    }

    #[test]
    fn test_true_false() {
        let err = TestError::Io;
        let ctx = ctx_at(1, Duration::ZERO, &err);
        assert!(TRUE.check(&ctx));
        assert!(!FALSE.check(&ctx));
        assert!(FALSE.not().check(&ctx));
    }

    #[test]
    fn test_and_truth_table() {
        let err = TestError::Io;
        let ctx = ctx_at(1, Duration::ZERO, &err);
        assert!(TRUE.and(TRUE).check(&ctx));
        assert!(!TRUE.and(FALSE).check(&ctx));
        assert!(!FALSE.and(TRUE).check(&ctx));
        assert!(!FALSE.and(FALSE).check(&ctx));
    }

    #[test]
    fn test_and_evaluates_left_first() {
        let err = TestError::Io;
        let ctx = ctx_at(1, Duration::ZERO, &err);
        let right = Arc::new(AtomicUsize::new(0));

        let cond = FALSE.and(Counting(right.clone(), true));
        assert!(!cond.check(&ctx));
        assert_eq!(right.load(Ordering::SeqCst), 0);

        let cond = TRUE.and(Counting(right.clone(), true));
        assert!(cond.check(&ctx));
        assert_eq!(right.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_handle_delegates() {
        let err = TestError::Io;
        let ctx = ctx_at(1, Duration::ZERO, &err);
        let shared: ConditionRef = TRUE.into_ref();
        let negated = shared.clone().not();

        assert!(shared.check(&ctx));
        assert!(!negated.check(&ctx));
        assert_eq!(negated.to_string(), "!(true)");
    }

    #[test]
    fn test_fn_condition() {
        let err = TestError::Timeout;
        let ctx = ctx_at(4, Duration::ZERO, &err);
        let even = FnCondition::new("attempt_is_even", |ctx: &Context<'_>| ctx.attempt_count() % 2 == 0);

        assert!(even.check(&ctx));
        assert_eq!(even.describe(&ctx), "attempt_is_even=true");
    }
}
