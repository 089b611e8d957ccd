//! # Failure listener trait.
//!
//! Provides [`FailureListener`] an extension point notified once per failed
//! attempt with the decision taken for it.
//!
//! ## Rules
//! - Listeners run synchronously, in registration order, before the wait (or
//!   before giving up).
//! - Listeners never influence the decision.
//! - An error returned by a listener stops the invocation with
//!   [`RetryError::Listener`](crate::RetryError::Listener); it is never mistaken
//!   for the work's own failure.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{Context, FailureListener, ListenerError};
//!
//! struct Audit;
//!
//! impl FailureListener for Audit {
//!     fn on_failure(&self, ctx: &Context<'_>, allow_retry: bool, backoff: Duration) -> Result<(), ListenerError> {
//!         if !allow_retry {
//!             eprintln!("gave up after {} attempts: {}", ctx.attempt_count(), ctx.failure());
//!         }
//!         let _ = backoff;
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "audit" }
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::{context::Context, error::ListenerError};

/// Shared listener handle.
pub type ListenerRef = Arc<dyn FailureListener>;

/// Observer of failed attempts.
pub trait FailureListener: Send + Sync + 'static {
    /// Called once per failed attempt.
    ///
    /// `allow_retry` tells whether another attempt follows; `backoff` is the wait
    /// before it (zero when giving up).
    fn on_failure(
        &self,
        ctx: &Context<'_>,
        allow_retry: bool,
        backoff: Duration,
    ) -> Result<(), ListenerError>;

    /// Returns the listener name used in errors and logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Function-backed listener.
pub struct FnListener<F> {
    name: &'static str,
    f: F,
}

impl<F> FnListener<F>
where
    F: Fn(&Context<'_>, bool, Duration) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    /// Creates a new function-backed listener.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc(name: &'static str, f: F) -> ListenerRef {
        Arc::new(Self::new(name, f))
    }
}

impl<F> FailureListener for FnListener<F>
where
    F: Fn(&Context<'_>, bool, Duration) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    fn on_failure(
        &self,
        ctx: &Context<'_>,
        allow_retry: bool,
        backoff: Duration,
    ) -> Result<(), ListenerError> {
        (self.f)(ctx, allow_retry, backoff)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::testing::{TestError, ctx_at};

    #[test]
    fn test_fn_listener_forwards_arguments() {
        let last = Arc::new(AtomicU32::new(0));
        let seen = last.clone();
        let listener = FnListener::new(
            "last_attempt",
            move |ctx: &Context<'_>, allow_retry: bool, backoff: Duration| -> Result<(), ListenerError> {
                assert!(allow_retry);
                assert_eq!(backoff, Duration::from_millis(10));
                seen.store(ctx.attempt_count(), Ordering::SeqCst);
                Ok(())
            },
        );

        let err = TestError::Io;
        listener
            .on_failure(&ctx_at(4, Duration::ZERO, &err), true, Duration::from_millis(10))
            .expect("listener ok");
        assert_eq!(last.load(Ordering::SeqCst), 4);
        assert_eq!(listener.name(), "last_attempt");
    }

    #[test]
    fn test_fn_listener_error_passes_through() {
        let listener = FnListener::arc("broken", |_: &Context<'_>, _: bool, _: Duration| -> Result<(), ListenerError> {
            Err("sink closed".into())
        });
        let err = TestError::Io;
        let res = listener.on_failure(&ctx_at(1, Duration::ZERO, &err), false, Duration::ZERO);
        assert_eq!(res.unwrap_err().to_string(), "sink closed");
    }
}
