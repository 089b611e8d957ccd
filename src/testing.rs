//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::{
    context::Context,
    error::{Interrupted, ListenerError},
    failure::{Failure, FailureKind},
    listeners::FailureListener,
    policy::Sleeper,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum TestError {
    #[error("io failure")]
    Io,
    #[error("timed out")]
    Timeout,
    #[error("bug #{0}")]
    Bug(u32),
    #[error("cancelled by caller")]
    Cancelled,
}

impl Failure for TestError {
    fn kind(&self) -> &'static FailureKind {
        match self {
            TestError::Io => &FailureKind::IO,
            TestError::Timeout => &FailureKind::TIMEOUT,
            TestError::Bug(_) => &FailureKind::DEFECT,
            TestError::Cancelled => &FailureKind::CANCELLED,
        }
    }
}

/// Context with `elapsed` measured from a fresh instant.
pub(crate) fn ctx_at(attempt_count: u32, elapsed: Duration, err: &TestError) -> Context<'_> {
    let start = Instant::now();
    Context::new(start, start + elapsed, attempt_count, err)
}

/// One recorded listener notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Seen {
    pub attempt: u32,
    pub allow_retry: bool,
    pub backoff: Duration,
    pub error: String,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingListener {
    pub seen: Arc<Mutex<Vec<Seen>>>,
}

impl RecordingListener {
    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().expect("listener lock").clone()
    }
}

impl FailureListener for RecordingListener {
    fn on_failure(
        &self,
        ctx: &Context<'_>,
        allow_retry: bool,
        backoff: Duration,
    ) -> Result<(), ListenerError> {
        self.seen.lock().expect("listener lock").push(Seen {
            attempt: ctx.attempt_count(),
            allow_retry,
            backoff,
            error: ctx.failure().to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Sleeper that records requested waits and returns immediately.
///
/// With `interrupt_at = Some(n)` the n-th wait (1-based) is interrupted.
#[derive(Clone, Default)]
pub(crate) struct RecordingSleeper {
    pub waits: Arc<Mutex<Vec<Duration>>>,
    pub interrupt_at: Option<usize>,
}

impl RecordingSleeper {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().expect("sleeper lock").clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, delay: Duration) -> Result<(), Interrupted> {
        let mut waits = self.waits.lock().expect("sleeper lock");
        waits.push(delay);
        if self.interrupt_at == Some(waits.len()) {
            return Err(Interrupted);
        }
        Ok(())
    }
}
