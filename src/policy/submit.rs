//! # Scheduled invocation.
//!
//! [`RetryPolicy::submit`] runs a unit of work on a caller-owned tokio runtime
//! and returns a [`RetryHandle`] at once. No thread is blocked for a backoff:
//! every retry is a fresh task spawned on the same runtime once the wait is over.
//!
//! ```text
//! submit ──► spawn(attempt #1) ──► RetryHandle (returned immediately)
//!
//! attempt #n ──ok──────────────────────────────► complete(Ok)
//!     │ err ─► decide ──no───────────────────────► complete(Failed)
//!     │             └─yes─► token cancelled? ──► complete(Cancelled)
//!     │                          │ no
//!     │                          ▼
//!     │              spawn(sleep(backoff) ─► recheck ─► attempt #n+1)
//!
//! spawned task ── token cancelled? ──► complete(Cancelled)   (checked before any wait)
//! ```
//!
//! ## Rules
//! - Attempts of one invocation never overlap: attempt `n+1` is spawned only
//!   after attempt `n` has finished and its decision was taken.
//! - The cancellation token is checked before every reschedule, again when the
//!   spawned task first runs, and raced against every wait. Work already
//!   running is never interrupted.
//! - The promise is completed exactly once; later completions are no-ops.
//! - If the chain is dropped without completing (runtime shut down, work
//!   panicked), the handle resolves to [`RetryError::Aborted`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::{context::Context, error::RetryError, failure::Failure, policy::RetryPolicy};

type Outcome<T, E> = Result<T, RetryError<E>>;

impl RetryPolicy {
    /// Starts `work` on `handle` and returns without waiting.
    ///
    /// The runtime stays owned by the caller; the policy never creates or shuts
    /// down one. `name` is used for diagnostics only.
    ///
    /// ## Example
    /// ```rust
    /// use std::time::Duration;
    /// use retryvisor::{FixedDelay, MaxAttempts, RetryPolicy};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let policy = RetryPolicy::new(MaxAttempts::new(3)?, FixedDelay::new(Duration::from_millis(1)));
    ///
    /// let handle = policy.submit(&tokio::runtime::Handle::current(), "ping", || async {
    ///     Ok::<_, std::io::Error>("pong")
    /// });
    /// assert_eq!(handle.await?, "pong");
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit<T, E, F, Fut>(&self, handle: &Handle, name: &str, work: F) -> RetryHandle<T, E>
    where
        T: Send + 'static,
        E: Failure,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let token = CancellationToken::new();
        let run = Run {
            policy: self.clone(),
            handle: handle.clone(),
            name: name.to_owned(),
            work,
            start: Instant::now(),
            attempts: 0,
            promise: Some(tx),
            token: token.clone(),
        };
        run.schedule(Duration::ZERO, None);
        RetryHandle { rx, token }
    }
}

/// One scheduled invocation, moved from task to task.
struct Run<T, E, F> {
    policy: RetryPolicy,
    handle: Handle,
    name: String,
    work: F,
    start: Instant,
    attempts: u32,
    promise: Option<oneshot::Sender<Outcome<T, E>>>,
    token: CancellationToken,
}

impl<T, E, F, Fut> Run<T, E, F>
where
    T: Send + 'static,
    E: Failure,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    /// Spawns the next attempt after `delay`.
    ///
    /// `last` is the failure that led here; the condition is re-evaluated against
    /// it once the wait is over.
    fn schedule(mut self, delay: Duration, last: Option<E>) {
        if self.token.is_cancelled() {
            tracing::debug!(name = %self.name, attempts = self.attempts, "cancelled before reschedule");
            self.complete(Err(RetryError::Cancelled));
            return;
        }

        let handle = self.handle.clone();
        let next: BoxFuture<'static, ()> = Box::pin(async move {
            let mut run = self;
            let cancelled = if run.token.is_cancelled() {
                true
            } else if delay.is_zero() {
                false
            } else {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => false,
                    _ = run.token.cancelled() => true,
                }
            };
            if cancelled {
                tracing::debug!(name = %run.name, attempts = run.attempts, "backoff wait cancelled");
                run.complete(Err(RetryError::Cancelled));
                return;
            }

            if let Some(error) = last {
                let recheck = {
                    let ctx = Context::new(run.start, Instant::now(), run.attempts, &error);
                    let recheck = run.policy.recheck(&ctx);
                    if let Ok(false) = recheck {
                        RetryPolicy::log_give_up(&run.name, &ctx);
                    }
                    recheck
                };
                match recheck {
                    Ok(true) => {}
                    Ok(false) => {
                        run.complete(Err(RetryError::Failed(error)));
                        return;
                    }
                    Err(failure) => {
                        run.complete(Err(RetryError::Listener(failure)));
                        return;
                    }
                }
            }

            run.attempt().await;
        });
        handle.spawn(next);
    }

    async fn attempt(mut self) {
        self.attempts = self.attempts.saturating_add(1);
        let error = match (self.work)().await {
            Ok(value) => {
                RetryPolicy::log_success(&self.name, self.attempts);
                self.complete(Ok(value));
                return;
            }
            Err(error) => error,
        };

        let decision = {
            let ctx = Context::new(self.start, Instant::now(), self.attempts, &error);
            let decision = self.policy.decide(&ctx);
            if let Ok(None) = decision {
                RetryPolicy::log_give_up(&self.name, &ctx);
            }
            decision
        };

        match decision {
            Ok(Some(delay)) => self.schedule(delay, Some(error)),
            Ok(None) => self.complete(Err(RetryError::Failed(error))),
            Err(failure) => self.complete(Err(RetryError::Listener(failure))),
        }
    }

    fn complete(&mut self, outcome: Outcome<T, E>) {
        if let Some(promise) = self.promise.take() {
            // The handle may have been dropped; the outcome is discarded then.
            let _ = promise.send(outcome);
        }
    }
}

/// Handle to a submitted invocation.
///
/// Awaiting it yields the final outcome. Dropping it does not stop the
/// invocation; call [`cancel`](Self::cancel) for that.
#[must_use = "dropping the handle detaches the invocation"]
pub struct RetryHandle<T, E> {
    rx: oneshot::Receiver<Outcome<T, E>>,
    token: CancellationToken,
}

impl<T, E> RetryHandle<T, E> {
    /// Requests cancellation.
    ///
    /// A pending wait ends at once and no further attempt is started; an attempt
    /// already running finishes first. The handle then resolves to
    /// [`RetryError::Cancelled`] unless that attempt completed the invocation.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Indicates whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns a token that cancels this invocation when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Blocks the current thread until the invocation completes.
    ///
    /// Must not be called from within an async context.
    pub fn wait(self) -> Outcome<T, E> {
        self.rx.blocking_recv().unwrap_or(Err(RetryError::Aborted))
    }
}

impl<T, E> Future for RetryHandle<T, E> {
    type Output = Outcome<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.unwrap_or(Err(RetryError::Aborted)))
    }
}
