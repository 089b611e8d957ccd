//! # Backoff policy trait.
//!
//! A [`BackoffPolicy`] turns a [`Context`] into the wait inserted before the next
//! attempt. Implementations are pure functions of the context and of their own
//! construction parameters; [`RandomDelay`](crate::RandomDelay) is the one
//! deliberate exception.

use std::sync::Arc;
use std::time::Duration;

use crate::context::Context;

/// Shared backoff handle.
pub type BackoffRef = Arc<dyn BackoffPolicy>;

/// Computes how long to wait before the next attempt.
pub trait BackoffPolicy: Send + Sync + 'static {
    /// Returns the wait for the failure described by `ctx`.
    fn backoff(&self, ctx: &Context<'_>) -> Duration;
}

impl<B: BackoffPolicy + ?Sized> BackoffPolicy for Arc<B> {
    fn backoff(&self, ctx: &Context<'_>) -> Duration {
        (**self).backoff(ctx)
    }
}

/// Combinators available on every backoff policy.
pub trait BackoffExt: BackoffPolicy + Sized {
    /// Adds the result of `other` (saturating).
    ///
    /// # Example
    /// ```rust
    /// use std::time::Duration;
    /// use retryvisor::{BackoffExt, Exponential, RandomDelay};
    ///
    /// let jittered = Exponential::new(Duration::from_secs(1), Duration::from_secs(10))
    ///     .plus(RandomDelay::new(Duration::from_secs(1), Duration::from_secs(2))?);
    /// # let _ = jittered;
    /// # Ok::<(), retryvisor::ConfigError>(())
    /// ```
    fn plus<B: BackoffPolicy>(self, other: B) -> Plus<Self, B> {
        Plus(self, other)
    }

    /// Moves the policy behind a shared handle.
    fn into_ref(self) -> BackoffRef {
        Arc::new(self)
    }
}

impl<B: BackoffPolicy> BackoffExt for B {}

/// No wait at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoBackoff;

impl BackoffPolicy for NoBackoff {
    fn backoff(&self, _ctx: &Context<'_>) -> Duration {
        Duration::ZERO
    }
}

/// Sum of two policies.
#[derive(Clone, Debug)]
pub struct Plus<A, B>(pub A, pub B);

impl<A: BackoffPolicy, B: BackoffPolicy> BackoffPolicy for Plus<A, B> {
    fn backoff(&self, ctx: &Context<'_>) -> Duration {
        self.0.backoff(ctx).saturating_add(self.1.backoff(ctx))
    }
}
