//! # Blocking invocation.
//!
//! [`RetryPolicy::call`] runs a unit of work on the calling thread until it
//! succeeds or the policy gives up.
//!
//! ```text
//! ATTEMPTING ──ok──► SUCCESS
//!     │ err
//!     ▼
//! EVALUATING ──no──► GIVEN_UP (Failed(original error))
//!     │ yes
//!     ▼
//! WAITING ──interrupted──► Cancelled
//!     │ recheck (fresh context)
//!     ├─ no ──► GIVEN_UP
//!     └─ yes ─► ATTEMPTING
//! ```
//!
//! ## Rules
//! - Attempts are strictly sequential; the thread is blocked only while waiting.
//! - Listeners are notified once per failed attempt, before waiting or giving up.
//! - The work's error is returned unchanged inside [`RetryError::Failed`].

use std::time::Instant;

use crate::{context::Context, error::RetryError, failure::Failure, policy::RetryPolicy};

impl RetryPolicy {
    /// Runs `work` until it succeeds or the policy gives up.
    ///
    /// `name` is used for diagnostics only.
    ///
    /// ### Errors
    /// - [`RetryError::Failed`] with the last failure once retrying stops;
    /// - [`RetryError::Cancelled`] when the sleeper is interrupted;
    /// - [`RetryError::Listener`] when a listener fails.
    pub fn call<T, E, F>(&self, name: &str, mut work: F) -> Result<T, RetryError<E>>
    where
        E: Failure,
        F: FnMut() -> Result<T, E>,
    {
        let start = Instant::now();
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            let error = match work() {
                Ok(value) => {
                    Self::log_success(name, attempts);
                    return Ok(value);
                }
                Err(error) => error,
            };

            let ctx = Context::new(start, Instant::now(), attempts, &error);
            let Some(delay) = self.decide(&ctx)? else {
                Self::log_give_up(name, &ctx);
                return Err(RetryError::Failed(error));
            };

            if self.sleeper().sleep(delay).is_err() {
                tracing::debug!(name, attempts, "backoff wait interrupted, cancelling");
                return Err(RetryError::Cancelled);
            }

            let ctx = ctx.restamped(Instant::now());
            if !self.recheck(&ctx)? {
                Self::log_give_up(name, &ctx);
                return Err(RetryError::Failed(error));
            }
        }
    }

    /// Wraps `work` into a closure that retries it through [`call`](Self::call).
    ///
    /// Every invocation of the returned closure is an independent retried
    /// invocation with its own attempt count and clock.
    ///
    /// ## Example
    /// ```rust
    /// use retryvisor::presets;
    ///
    /// let mut read = presets::NONE.decorate("read", || std::fs::read_to_string("/definitely/missing"));
    /// assert!(read().is_err());
    /// ```
    pub fn decorate<'p, T, E, F>(
        &'p self,
        name: &'p str,
        mut work: F,
    ) -> impl FnMut() -> Result<T, RetryError<E>> + use<'p, T, E, F>
    where
        E: Failure,
        F: FnMut() -> Result<T, E>,
    {
        move || self.call(name, &mut work)
    }
}
