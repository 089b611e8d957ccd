//! # Default failure logger.
//!
//! Logs every failed attempt through `tracing` at `info` level.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO retryvisor: invocation failed, will retry attempt=1 elapsed_ms=3 backoff_ms=100 error=connection refused
//! INFO retryvisor: invocation failed, giving up attempt=3 elapsed_ms=310 error=connection refused
//! ```
//!
//! Two conditions tune the output:
//! - `log`: the failure is logged only when it holds;
//! - `verbose`: the error's source chain is attached as `causes`.

use std::error::Error as _;
use std::time::Duration;

use crate::{
    conditions::{Always, Condition, ConditionExt, ConditionRef},
    context::Context,
    error::ListenerError,
    listeners::FailureListener,
};

/// Failure listener writing to `tracing`.
#[derive(Clone)]
pub struct LogListener {
    log: ConditionRef,
    verbose: ConditionRef,
}

impl Default for LogListener {
    /// Logs every failure, with its source chain.
    fn default() -> Self {
        Self {
            log: Always.into_ref(),
            verbose: Always.into_ref(),
        }
    }
}

impl LogListener {
    /// Construct a new [`LogListener`].
    #[must_use]
    pub fn new(log: impl Condition, verbose: impl Condition) -> Self {
        Self {
            log: log.into_ref(),
            verbose: verbose.into_ref(),
        }
    }

    fn causes(ctx: &Context<'_>) -> String {
        let mut chain = Vec::new();
        let mut source = ctx.failure().source();
        while let Some(err) = source {
            chain.push(err.to_string());
            source = err.source();
        }
        chain.join(": ")
    }
}

impl FailureListener for LogListener {
    fn on_failure(
        &self,
        ctx: &Context<'_>,
        allow_retry: bool,
        backoff: Duration,
    ) -> Result<(), ListenerError> {
        if !self.log.check(ctx) {
            return Ok(());
        }
        let attempt = ctx.attempt_count();
        let elapsed_ms = ctx.elapsed().as_millis() as u64;
        let error = ctx.failure();
        let kind = error.kind().name();
        let causes = if self.verbose.check(ctx) {
            Self::causes(ctx)
        } else {
            String::new()
        };

        if allow_retry {
            tracing::info!(
                attempt,
                elapsed_ms,
                backoff_ms = backoff.as_millis() as u64,
                kind,
                error = %error,
                causes = %causes,
                "invocation failed, will retry"
            );
        } else {
            tracing::info!(
                attempt,
                elapsed_ms,
                kind,
                error = %error,
                causes = %causes,
                "invocation failed, giving up"
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use thiserror::Error;

    use super::*;
    use crate::conditions::Never;
    use crate::failure::Failure;

    #[derive(Error, Debug)]
    #[error("request failed")]
    struct Outer {
        #[source]
        inner: std::io::Error,
    }

    impl Failure for Outer {}

    #[test]
    fn test_causes_walk_source_chain() {
        let err = Outer {
            inner: std::io::Error::other("socket closed"),
        };
        let start = std::time::Instant::now();
        let ctx = Context::new(start, start, 1, &err);
        assert_eq!(LogListener::causes(&ctx), "socket closed");
    }

    #[test]
    fn test_never_logs_but_succeeds() {
        let listener = LogListener::new(Never, Never);
        let err = Outer {
            inner: std::io::Error::other("socket closed"),
        };
        let start = std::time::Instant::now();
        let ctx = Context::new(start, start, 1, &err);
        assert!(listener.on_failure(&ctx, true, Duration::from_secs(1)).is_ok());
        assert!(LogListener::default().on_failure(&ctx, false, Duration::ZERO).is_ok());
        assert_eq!(listener.name(), "log");
    }
}
