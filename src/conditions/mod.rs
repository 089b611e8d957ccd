//! Retry conditions.
//!
//! This module groups the predicates that decide **whether** a failed
//! invocation may run again.
//!
//! ## Contents
//! - [`Condition`] the predicate trait, with [`ConditionExt`] for `not`/`and`
//! - [`Always`]/[`Never`] (also as [`TRUE`]/[`FALSE`])
//! - [`MaxAttempts`], [`MaxTimeElapsed`] budget limits
//! - [`KindIn`] failure-kind filter, [`KindIn::unrecoverable`] default abort set
//! - [`FnCondition`] closure-backed predicate
//!
//! ## Quick wiring
//! ```text
//! RetryPolicy { retry_condition, abort_condition, .. }
//!      └─► effective = NOT abort_condition AND retry_condition
//!           evaluated once per failed attempt (and once more after the wait)
//! ```

mod condition;
mod kind;
mod limits;

pub use condition::{
    Always, And, Condition, ConditionExt, ConditionRef, FALSE, FnCondition, Never, Not, TRUE,
};
pub use kind::KindIn;
pub use limits::{MaxAttempts, MaxTimeElapsed};
