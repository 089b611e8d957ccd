//! # Retry policy.
//!
//! [`RetryPolicy`] bundles everything a retried invocation needs:
//! - retry condition ([`Condition`]): keep going while it holds;
//! - abort condition ([`Condition`]): stop at once when it holds;
//! - backoff ([`BackoffPolicy`]): how long to wait;
//! - failure listeners ([`FailureListener`]): who gets told;
//! - sleeper ([`Sleeper`]): how the blocking loop waits.
//!
//! A policy is immutable and cheap to clone (every part is behind an `Arc`). It
//! holds no per-invocation state, so one instance serves any number of concurrent
//! `call`/`submit` invocations.
//!
//! ## Decision per failed attempt
//! ```text
//! Context ──► effective = !abort && retry
//!               ├─ false ─► listeners(ctx, false, 0)       ─► give up
//!               └─ true  ─► backoff = backoff.backoff(ctx)
//!                           listeners(ctx, true, backoff)  ─► wait ─► next attempt
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{FixedDelay, MaxAttempts, RetryPolicy};
//!
//! let policy = RetryPolicy::new(MaxAttempts::new(3)?, FixedDelay::new(Duration::from_millis(1)));
//!
//! let mut calls = 0;
//! let value = policy.call("flaky", || {
//!     calls += 1;
//!     if calls < 3 { Err(std::io::Error::other("not yet")) } else { Ok(calls) }
//! })?;
//! assert_eq!(value, 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    backoff::{BackoffPolicy, BackoffRef, Exponential},
    conditions::{Condition, ConditionExt, ConditionRef, KindIn, MaxAttempts},
    config::Config,
    context::Context,
    error::{ConfigError, ListenerFailure},
    listeners::{FailureListener, ListenerRef, LogListener},
    policy::sleeper::{Sleeper, SleeperRef, ThreadSleeper},
};

/// Immutable retry configuration.
#[derive(Clone)]
pub struct RetryPolicy {
    retry: ConditionRef,
    abort: ConditionRef,
    effective: ConditionRef,
    backoff: BackoffRef,
    listeners: Vec<ListenerRef>,
    sleeper: SleeperRef,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("condition", &self.effective.to_string())
            .field(
                "listeners",
                &self.listeners.iter().map(|l| l.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl RetryPolicy {
    /// Creates a policy with explicit retry condition and backoff.
    ///
    /// The remaining parts take their defaults:
    /// - abort condition: [`KindIn::unrecoverable`];
    /// - listeners: one [`LogListener`];
    /// - sleeper: [`ThreadSleeper`].
    pub fn new(retry: impl Condition, backoff: impl BackoffPolicy) -> Self {
        Self::from_parts(
            retry.into_ref(),
            KindIn::unrecoverable().into_ref(),
            Arc::new(backoff),
            vec![Arc::new(LogListener::default())],
            Arc::new(ThreadSleeper),
        )
    }

    /// Creates a builder pre-filled with defaults.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::new()
    }

    /// Builds a policy from plain configuration.
    ///
    /// The retry condition is the conjunction of the configured limits
    /// (always `true` when neither is set); backoff is exponential.
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        Ok(Self::builder()
            .with_retry_condition_ref(cfg.retry_condition()?)
            .with_backoff(Exponential::new(cfg.initial_backoff, cfg.max_backoff))
            .build())
    }

    fn from_parts(
        retry: ConditionRef,
        abort: ConditionRef,
        backoff: BackoffRef,
        listeners: Vec<ListenerRef>,
        sleeper: SleeperRef,
    ) -> Self {
        let effective = abort.clone().not().and(retry.clone()).into_ref();
        Self {
            retry,
            abort,
            effective,
            backoff,
            listeners,
            sleeper,
        }
    }

    /// Returns a new policy with the given abort condition.
    pub fn with_abort_condition(self, abort: impl Condition) -> Self {
        Self::from_parts(
            self.retry,
            abort.into_ref(),
            self.backoff,
            self.listeners,
            self.sleeper,
        )
    }

    /// Returns a new policy with the given listeners (replacing the current ones).
    pub fn with_listeners(mut self, listeners: Vec<ListenerRef>) -> Self {
        self.listeners = listeners;
        self
    }

    /// Returns a new policy with one more listener appended.
    pub fn with_listener(mut self, listener: impl FailureListener) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Returns a new policy with the given sleeper.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Returns the retry condition.
    pub fn retry_condition(&self) -> &ConditionRef {
        &self.retry
    }

    /// Returns the abort condition.
    pub fn abort_condition(&self) -> &ConditionRef {
        &self.abort
    }

    /// Returns the effective condition, `!abort && retry`.
    pub fn condition(&self) -> &ConditionRef {
        &self.effective
    }

    /// Returns the backoff policy.
    pub fn backoff(&self) -> &BackoffRef {
        &self.backoff
    }

    /// Returns the listeners, in notification order.
    pub fn listeners(&self) -> &[ListenerRef] {
        &self.listeners
    }

    pub(crate) fn sleeper(&self) -> &SleeperRef {
        &self.sleeper
    }

    /// Evaluates one failed attempt and notifies listeners.
    ///
    /// Returns `Some(backoff)` when another attempt may follow.
    pub(crate) fn decide(&self, ctx: &Context<'_>) -> Result<Option<Duration>, ListenerFailure> {
        let allow_retry = self.effective.check(ctx);
        tracing::trace!(
            condition = %self.effective.describe(ctx),
            allow_retry,
            "evaluated retry condition"
        );
        let backoff = if allow_retry {
            self.backoff.backoff(ctx)
        } else {
            Duration::ZERO
        };
        self.notify(ctx, allow_retry, backoff)?;
        Ok(allow_retry.then_some(backoff))
    }

    /// Re-checks the effective condition with a context stamped after the wait.
    ///
    /// When it no longer holds, listeners are told the invocation gives up.
    pub(crate) fn recheck(&self, ctx: &Context<'_>) -> Result<bool, ListenerFailure> {
        let allow_retry = self.effective.check(ctx);
        if !allow_retry {
            tracing::trace!(
                condition = %self.effective.describe(ctx),
                "retry condition no longer holds after backoff"
            );
            self.notify(ctx, false, Duration::ZERO)?;
        }
        Ok(allow_retry)
    }

    /// Runs every listener in registration order, stopping at the first error.
    fn notify(
        &self,
        ctx: &Context<'_>,
        allow_retry: bool,
        backoff: Duration,
    ) -> Result<(), ListenerFailure> {
        for listener in &self.listeners {
            listener
                .on_failure(ctx, allow_retry, backoff)
                .map_err(|source| ListenerFailure {
                    listener: listener.name(),
                    source,
                })?;
        }
        Ok(())
    }

    pub(crate) fn log_give_up(name: &str, ctx: &Context<'_>) {
        tracing::debug!(
            name,
            attempts = ctx.attempt_count(),
            elapsed_ms = ctx.elapsed().as_millis() as u64,
            error = %ctx.failure(),
            "giving up"
        );
    }

    pub(crate) fn log_success(name: &str, attempts: u32) {
        if attempts > 1 {
            tracing::debug!(name, attempts, "succeeded after retries");
        }
    }
}

/// Builder for [`RetryPolicy`] with fluent API.
///
/// Defaults:
/// - retry condition: `MaxAttempts(3)`;
/// - abort condition: [`KindIn::unrecoverable`];
/// - backoff: `Exponential::default()` (100ms doubling up to 30s);
/// - listeners: one [`LogListener`];
/// - sleeper: [`ThreadSleeper`].
#[derive(Clone)]
pub struct RetryPolicyBuilder {
    retry: ConditionRef,
    abort: ConditionRef,
    backoff: BackoffRef,
    listeners: Vec<ListenerRef>,
    sleeper: SleeperRef,
}

impl Default for RetryPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicyBuilder {
    /// Creates a builder with the documented defaults.
    pub fn new() -> Self {
        Self {
            retry: Arc::new(MaxAttempts::DEFAULT),
            abort: KindIn::unrecoverable().into_ref(),
            backoff: Arc::new(Exponential::default()),
            listeners: vec![Arc::new(LogListener::default())],
            sleeper: Arc::new(ThreadSleeper),
        }
    }

    /// Sets the retry condition.
    pub fn with_retry_condition(mut self, retry: impl Condition) -> Self {
        self.retry = retry.into_ref();
        self
    }

    /// Sets the retry condition from a shared handle.
    pub fn with_retry_condition_ref(mut self, retry: ConditionRef) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the abort condition.
    pub fn with_abort_condition(mut self, abort: impl Condition) -> Self {
        self.abort = abort.into_ref();
        self
    }

    /// Sets the backoff policy.
    pub fn with_backoff(mut self, backoff: impl BackoffPolicy) -> Self {
        self.backoff = Arc::new(backoff);
        self
    }

    /// Replaces the listener list (an empty list silences notifications).
    pub fn with_listeners(mut self, listeners: Vec<ListenerRef>) -> Self {
        self.listeners = listeners;
        self
    }

    /// Appends a listener after the current ones.
    pub fn with_listener(mut self, listener: impl FailureListener) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Sets the sleeper used by the blocking loop.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Builds the policy.
    pub fn build(self) -> RetryPolicy {
        RetryPolicy::from_parts(
            self.retry,
            self.abort,
            self.backoff,
            self.listeners,
            self.sleeper,
        )
    }
}
