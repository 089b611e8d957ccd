//! Error types used by the retry engine.
//!
//! This module defines the error taxonomy:
//!
//! - [`ConfigError`]: invalid policy construction, raised when a condition or
//!   backoff is built, never at call time.
//! - [`RetryError`]: the terminating outcome of a `call`/`submit` invocation.
//!   The work's own failure travels inside [`RetryError::Failed`] untouched.
//! - [`ListenerFailure`]: an error raised by a failure listener, kept apart
//!   from the work's failure.
//! - [`Interrupted`]: a backoff wait was cut short by cancellation.
//!
//! All enums provide `as_label` for logs/metrics.

use std::time::Duration;

use thiserror::Error;

/// Boxed error returned by failure listeners.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced while assembling a policy.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `MaxAttempts` needs at least two attempts to ever retry.
    #[error("max attempts must be greater than 1, got {amount}")]
    MaxAttempts {
        /// The rejected amount.
        amount: u32,
    },

    /// `MaxTimeElapsed` needs a positive budget.
    #[error("max elapsed time must be positive, got {duration:?}")]
    MaxTimeElapsed {
        /// The rejected duration.
        duration: Duration,
    },

    /// A random range with `min > max`.
    #[error("empty duration range {min:?}..={max:?}")]
    EmptyRange {
        /// Lower bound.
        min: Duration,
        /// Upper bound.
        max: Duration,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retryvisor::ConfigError;
    ///
    /// let err = ConfigError::MaxAttempts { amount: 1 };
    /// assert_eq!(err.as_label(), "config_max_attempts");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MaxAttempts { .. } => "config_max_attempts",
            ConfigError::MaxTimeElapsed { .. } => "config_max_time_elapsed",
            ConfigError::EmptyRange { .. } => "config_empty_range",
        }
    }
}

/// A failure listener returned an error.
#[derive(Error, Debug)]
#[error("failure listener `{listener}` failed: {source}")]
pub struct ListenerFailure {
    /// Name of the listener, see [`FailureListener::name`](crate::FailureListener::name).
    pub listener: &'static str,
    /// The error the listener returned.
    #[source]
    pub source: ListenerError,
}

/// A backoff wait was interrupted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("backoff wait interrupted")]
pub struct Interrupted;

/// # Terminating outcome of a retried invocation.
///
/// [`RetryError::Failed`] carries the last failure of the unit of work exactly as
/// it was produced; every other variant belongs to the engine itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// The work failed and the policy gave up (exhausted or aborted).
    #[error("{0}")]
    Failed(E),

    /// The invocation was cancelled while waiting for the next attempt.
    #[error("retry cancelled")]
    Cancelled,

    /// A failure listener failed; the decision pipeline stopped there.
    #[error(transparent)]
    Listener(#[from] ListenerFailure),

    /// The scheduled attempt chain was dropped before completing
    /// (runtime shut down or the work panicked).
    #[error("retry chain dropped before completion")]
    Aborted,
}

impl<E> RetryError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::Failed(_) => "retry_failed",
            RetryError::Cancelled => "retry_cancelled",
            RetryError::Listener(_) => "retry_listener",
            RetryError::Aborted => "retry_aborted",
        }
    }

    /// Returns the work's failure, if this is [`RetryError::Failed`].
    pub fn into_failure(self) -> Option<E> {
        match self {
            RetryError::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Borrows the work's failure, if this is [`RetryError::Failed`].
    pub fn failure(&self) -> Option<&E> {
        match self {
            RetryError::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Indicates whether the invocation ended through cancellation.
    ///
    /// # Example
    /// ```
    /// use retryvisor::RetryError;
    ///
    /// let err: RetryError<std::io::Error> = RetryError::Cancelled;
    /// assert!(err.is_cancelled());
    /// ```
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_keeps_original_error() {
        let original = std::io::Error::other("disk gone");
        let err = RetryError::Failed(original);

        assert_eq!(err.as_label(), "retry_failed");
        assert_eq!(err.to_string(), "disk gone");
        let back = err.into_failure().expect("failed variant");
        assert_eq!(back.kind(), std::io::ErrorKind::Other);
    }

    #[test]
    fn test_listener_failure_renders_listener_name() {
        let err: RetryError<std::io::Error> = ListenerFailure {
            listener: "audit",
            source: "sink closed".into(),
        }
        .into();

        assert_eq!(err.as_label(), "retry_listener");
        assert_eq!(err.to_string(), "failure listener `audit` failed: sink closed");
        assert!(err.failure().is_none());
    }

    #[test]
    fn test_config_error_labels() {
        let err = ConfigError::MaxTimeElapsed {
            duration: Duration::ZERO,
        };
        assert_eq!(err.as_label(), "config_max_time_elapsed");
        assert_eq!(
            ConfigError::EmptyRange {
                min: Duration::from_secs(2),
                max: Duration::from_secs(1),
            }
            .as_label(),
            "config_empty_range"
        );
    }
}
