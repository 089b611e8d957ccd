//! Backoff policies.
//!
//! This module groups the knobs that decide **how long** to wait between attempts.
//!
//! ## Contents
//! - [`BackoffPolicy`] the trait, with [`BackoffExt`] for `plus`
//! - [`NoBackoff`]     always zero (tests, idempotent fast paths)
//! - [`FixedDelay`]    constant wait
//! - [`FixedInterval`] attempts aligned to a fixed grid from the invocation start
//! - [`Exponential`]   doubling, overflow-safe, capped
//! - [`RandomDelay`]   uniform jitter
//!
//! ## Defaults
//! - `Exponential::default()` → init=100ms, max=30s.

mod exponential;
mod fixed;
mod policy;
mod random;

pub use exponential::Exponential;
pub use fixed::{FixedDelay, FixedInterval};
pub use policy::{BackoffExt, BackoffPolicy, BackoffRef, NoBackoff, Plus};
pub use random::RandomDelay;
