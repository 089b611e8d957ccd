//! # Failure listeners.
//!
//! This module provides the [`FailureListener`] trait and built-in implementations
//! notified after every failed attempt.
//!
//! ## Architecture
//! ```text
//! attempt fails ──► Context ──► condition + backoff ──► decision (allow_retry, backoff)
//!                                                          │
//!                                      for each listener, in registration order:
//!                                                          ├──► LogListener (default)
//!                                                          ├──► FnListener
//!                                                          └──► custom ...
//! ```

mod listener;
mod log;

pub use listener::{FailureListener, FnListener, ListenerRef};
pub use log::LogListener;
