//! Retry policy and its two ways of running work.
//!
//! ## Contents
//! - [`RetryPolicy`]        immutable configuration, with [`RetryPolicyBuilder`]
//! - `call` / `decorate`    blocking loop on the calling thread
//! - `submit`               scheduled loop on a tokio runtime, see [`RetryHandle`]
//! - [`Sleeper`]            blocking wait seam ([`ThreadSleeper`], [`CancellableSleeper`])
//! - [`presets`]            frozen `NONE` / `ALWAYS` policies

mod call;
pub mod presets;
mod retry;
mod sleeper;
mod submit;

pub use retry::{RetryPolicy, RetryPolicyBuilder};
pub use sleeper::{CancellableSleeper, Sleeper, SleeperRef, ThreadSleeper};
pub use submit::RetryHandle;
