//! # retryvisor
//!
//! **Retryvisor** is a retry decision engine for Rust.
//!
//! It runs a unit of work and, when the work fails, decides whether to try again
//! and how long to wait first. The decision is made from composable conditions,
//! backoff policies and an observable stream of failure notifications.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                    ┌──────────────────────────────────────────┐
//!   work() ──Err──►  │ Context { start, now, attempt_count, e } │
//!                    └────────────────────┬─────────────────────┘
//!                                         ▼
//!     ┌───────────────────────────────────────────────────────────────┐
//!     │  RetryPolicy (immutable, shared)                              │
//!     │  - effective condition = !abort_condition && retry_condition  │
//!     │  - BackoffPolicy (how long to wait)                           │
//!     │  - FailureListeners (told about every failure, in order)      │
//!     │  - Sleeper (blocking wait seam)                               │
//!     └──────┬───────────────────────────────────────────┬────────────┘
//!            ▼                                           ▼
//!     ┌──────────────────┐                     ┌──────────────────────┐
//!     │ call / decorate  │                     │ submit               │
//!     │ blocks the       │                     │ tasks on a caller's  │
//!     │ calling thread   │                     │ tokio runtime        │
//!     └──────────────────┘                     └──────────────────────┘
//! ```
//!
//! ### Lifecycle of one invocation
//! ```text
//! loop {
//!   ├─► attempt_count += 1
//!   ├─► work()
//!   │     ├─ Ok  ──► return value
//!   │     └─ Err ──► ctx = Context::new(start, now, attempt_count, &err)
//!   │                ├─ effective(ctx) == false
//!   │                │     ├─ listeners(ctx, false, 0)
//!   │                │     └─ return Failed(err)          (error untouched)
//!   │                └─ effective(ctx) == true
//!   │                      ├─ backoff = backoff.backoff(ctx)
//!   │                      ├─ listeners(ctx, true, backoff)
//!   │                      ├─ wait(backoff)                (cancellable)
//!   │                      └─ recheck with a fresh ctx, then continue
//! }
//! ```
//!
//! ## Features
//! | Area           | Description                                               | Key types / traits                                    |
//! |----------------|-----------------------------------------------------------|-------------------------------------------------------|
//! | **Failures**   | Tag errors with kinds forming an explicit tree.           | [`Failure`], [`FailureKind`]                          |
//! | **Conditions** | Decide whether to retry; compose with `not`/`and`.        | [`Condition`], [`MaxAttempts`], [`KindIn`]            |
//! | **Backoff**    | Decide how long to wait.                                  | [`BackoffPolicy`], [`Exponential`], [`FixedInterval`] |
//! | **Listeners**  | Observe every failed attempt.                             | [`FailureListener`], [`LogListener`]                  |
//! | **Execution**  | Blocking loop or scheduled tasks on tokio.                | [`RetryPolicy`], [`RetryHandle`]                      |
//! | **Errors**     | Typed errors; the work's own error is never wrapped away. | [`RetryError`], [`ConfigError`]                       |
//! | **Config**     | Plain-value settings with defaults.                       | [`Config`]                                            |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{BackoffExt, ConditionExt, Exponential, MaxAttempts, MaxTimeElapsed, RandomDelay, RetryPolicy};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let policy = RetryPolicy::builder()
//!         .with_retry_condition(MaxAttempts::new(5)?.and(MaxTimeElapsed::from_secs(10)?))
//!         .with_backoff(
//!             Exponential::new(Duration::from_millis(1), Duration::from_millis(20))
//!                 .plus(RandomDelay::new(Duration::ZERO, Duration::from_millis(2))?),
//!         )
//!         .build();
//!
//!     // Blocking.
//!     let mut tries = 0;
//!     let n = policy.call("count", || {
//!         tries += 1;
//!         if tries < 3 { Err(std::io::Error::other("busy")) } else { Ok(tries) }
//!     })?;
//!     assert_eq!(n, 3);
//!
//!     // Scheduled.
//!     let handle = policy.submit(&tokio::runtime::Handle::current(), "ping", || async {
//!         Ok::<_, std::io::Error>("pong")
//!     });
//!     assert_eq!(handle.await?, "pong");
//!     Ok(())
//! }
//! ```
mod backoff;
mod conditions;
mod config;
mod context;
mod error;
mod failure;
mod listeners;
mod policy;

#[cfg(test)]
mod testing;

// ---- Public re-exports ----

pub use backoff::{
    BackoffExt, BackoffPolicy, BackoffRef, Exponential, FixedDelay, FixedInterval, NoBackoff,
    Plus, RandomDelay,
};
pub use conditions::{
    Always, And, Condition, ConditionExt, ConditionRef, FALSE, FnCondition, KindIn, MaxAttempts,
    MaxTimeElapsed, Never, Not, TRUE,
};
pub use config::Config;
pub use context::Context;
pub use error::{ConfigError, Interrupted, ListenerError, ListenerFailure, RetryError};
pub use failure::{Failure, FailureKind};
pub use listeners::{FailureListener, FnListener, ListenerRef, LogListener};
pub use policy::{
    CancellableSleeper, RetryHandle, RetryPolicy, RetryPolicyBuilder, Sleeper, SleeperRef,
    ThreadSleeper, presets,
};
