//! # Example: submit_many
//!
//! Demonstrates scheduled retries: a hundred flaky jobs are submitted to the
//! current tokio runtime. Each fails twice and succeeds on its third attempt;
//! no thread is blocked while they back off. One extra job is cancelled while
//! it waits.
//!
//! ## Run
//! ```bash
//! RUST_LOG=retryvisor=debug cargo run --example submit_many
//! ```

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use futures::future::join_all;
use retryvisor::{FixedDelay, MaxAttempts, RetryPolicy, TRUE};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    // 1. Three attempts, 10ms apart; no listeners to keep the output short.
    let policy = RetryPolicy::new(MaxAttempts::new(3)?, FixedDelay::new(Duration::from_millis(10)))
        .with_listeners(Vec::new());
    let handle = Handle::current();

    // 2. Submit a hundred jobs; each fails twice.
    let invocations = Arc::new(AtomicU32::new(0));
    let jobs: Vec<_> = (0..100u32)
        .map(|job| {
            let invocations = invocations.clone();
            let mut calls = 0u32;
            policy.submit(&handle, "job", move || {
                calls += 1;
                let attempt = calls;
                invocations.fetch_add(1, Ordering::Relaxed);
                async move {
                    if attempt < 3 {
                        Err(io::Error::other(format!("job {job} busy")))
                    } else {
                        Ok(job)
                    }
                }
            })
        })
        .collect();

    let done = join_all(jobs).await.into_iter().filter(|res| res.is_ok()).count();
    println!(
        "[submit_many] {done}/100 jobs done with {} invocations",
        invocations.load(Ordering::Relaxed)
    );

    // 3. A job that never succeeds, cancelled during its backoff.
    let forever = RetryPolicy::new(TRUE, FixedDelay::from_secs(60)).with_listeners(Vec::new());
    let stuck = forever.submit(&handle, "stuck", || async {
        Err::<(), _>(io::Error::from(io::ErrorKind::ConnectionReset))
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    stuck.cancel();
    println!("[stuck] cancelled: {}", stuck.await.is_err_and(|e| e.is_cancelled()));
    Ok(())
}
