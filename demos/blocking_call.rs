//! # Example: blocking_call
//!
//! Demonstrates the blocking retry loop: a flaky read fails twice, is retried
//! with exponential backoff, and succeeds on the third attempt. A second call
//! fails with a defect and is given up at once.
//!
//! ## Flow
//! ```text
//! call("read_config")
//!   ├─► attempt 1 → Err(ConnectionRefused) → log "will retry" → sleep 50ms
//!   ├─► attempt 2 → Err(TimedOut)          → log "will retry" → sleep 100ms
//!   └─► attempt 3 → Ok("port=8080")
//!
//! call("parse_config")
//!   └─► attempt 1 → Err(defect) → log "giving up" → Failed(original error)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example blocking_call
//! ```

use std::{io, time::Duration};

use retryvisor::{
    ConditionExt, Exponential, Failure, FailureKind, MaxAttempts, MaxTimeElapsed, RetryError,
    RetryPolicy,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
#[error("unexpected token at line {line}")]
struct ParseBug {
    line: u32,
}

impl Failure for ParseBug {
    fn kind(&self) -> &'static FailureKind {
        &FailureKind::DEFECT
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 1. Retry up to 4 attempts within 5 seconds, doubling from 50ms.
    let policy = RetryPolicy::builder()
        .with_retry_condition(MaxAttempts::new(4)?.and(MaxTimeElapsed::from_secs(5)?))
        .with_backoff(Exponential::new(Duration::from_millis(50), Duration::from_secs(1)))
        .build();

    // 2. Work failing twice with recoverable I/O errors.
    let mut attempt = 0;
    let body = policy.call("read_config", || {
        attempt += 1;
        match attempt {
            1 => Err(io::Error::from(io::ErrorKind::ConnectionRefused)),
            2 => Err(io::Error::from(io::ErrorKind::TimedOut)),
            _ => Ok("port=8080"),
        }
    })?;
    println!("[read_config] {body} after {attempt} attempts");

    // 3. Defects are never retried; the original error comes back untouched.
    match policy.call("parse_config", || -> Result<(), ParseBug> { Err(ParseBug { line: 7 }) }) {
        Err(RetryError::Failed(bug)) => println!("[parse_config] gave up: {bug} (line {})", bug.line),
        other => println!("[parse_config] unexpected outcome: {other:?}"),
    }
    Ok(())
}
