//! # Blocking wait seam.
//!
//! [`Sleeper`] is how the blocking [`call`](crate::RetryPolicy::call) loop waits
//! out a backoff. It is injectable so tests run without wall-clock delay.
//!
//! - [`ThreadSleeper`] parks the calling thread; never interrupted.
//! - [`CancellableSleeper`] sleeps in short slices and returns [`Interrupted`] as
//!   soon as its [`CancellationToken`] fires.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::Interrupted;

/// Shared sleeper handle.
pub type SleeperRef = Arc<dyn Sleeper>;

/// Blocks the calling thread for a backoff.
pub trait Sleeper: Send + Sync + 'static {
    /// Waits for `delay`, or fails with [`Interrupted`] when cut short.
    fn sleep(&self, delay: Duration) -> Result<(), Interrupted>;
}

/// Plain `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) -> Result<(), Interrupted> {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        Ok(())
    }
}

/// Sleeper that honors a [`CancellationToken`].
///
/// The token is polled every `tick` (default 10ms), so cancellation is observed
/// within one tick. A token cancelled before the wait interrupts it immediately.
#[derive(Clone, Debug)]
pub struct CancellableSleeper {
    token: CancellationToken,
    tick: Duration,
}

impl CancellableSleeper {
    /// Default polling slice.
    pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

    /// Creates a sleeper bound to `token`.
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            tick: Self::DEFAULT_TICK,
        }
    }

    /// Returns a sleeper polling every `tick` (min 1ms).
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    /// The watched token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Sleeper for CancellableSleeper {
    fn sleep(&self, delay: Duration) -> Result<(), Interrupted> {
        let deadline = Instant::now().checked_add(delay);
        loop {
            if self.token.is_cancelled() {
                return Err(Interrupted);
            }
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => self.tick,
            };
            if remaining.is_zero() {
                return Ok(());
            }
            thread::sleep(remaining.min(self.tick));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_sleeper_zero_returns_immediately() {
        let start = Instant::now();
        assert!(ThreadSleeper.sleep(Duration::ZERO).is_ok());
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_cancellable_sleeper_completes() {
        let sleeper = CancellableSleeper::new(CancellationToken::new()).with_tick(Duration::from_millis(1));
        let start = Instant::now();
        assert!(sleeper.sleep(Duration::from_millis(20)).is_ok());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_cancelled_before_wait() {
        let token = CancellationToken::new();
        token.cancel();
        let sleeper = CancellableSleeper::new(token);
        assert_eq!(sleeper.sleep(Duration::from_secs(60)), Err(Interrupted));
    }

    #[test]
    fn test_cancelled_during_wait() {
        let token = CancellationToken::new();
        let sleeper = CancellableSleeper::new(token.clone()).with_tick(Duration::from_millis(1));
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            token.cancel();
        });

        let start = Instant::now();
        assert_eq!(sleeper.sleep(Duration::from_secs(60)), Err(Interrupted));
        assert!(start.elapsed() < Duration::from_secs(30));
        canceller.join().expect("canceller thread");
    }
}
