//! # Failure kinds.
//!
//! A [`FailureKind`] is a tag with an optional parent kind. Kinds form a small
//! tree, and [`FailureKind::is_a`] walks it, so a filter on a general kind also
//! matches every more specific kind below it.
//!
//! ```text
//! CANCELLED   DEFECT   FATAL   OTHER   IO
//!                                      ├── TIMEOUT
//!                                      └── CONNECTION
//! ```
//!
//! Errors take part in retry decisions by implementing [`Failure`].
//!
//! ## Example
//! ```rust
//! use retryvisor::{Failure, FailureKind};
//!
//! const QUOTA: FailureKind = FailureKind::subkind_of("quota", &FailureKind::IO);
//!
//! #[derive(Debug)]
//! struct QuotaExceeded;
//!
//! impl std::fmt::Display for QuotaExceeded {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str("quota exceeded")
//!     }
//! }
//! impl std::error::Error for QuotaExceeded {}
//!
//! impl Failure for QuotaExceeded {
//!     fn kind(&self) -> &'static FailureKind { &QUOTA }
//! }
//!
//! assert!(QuotaExceeded.kind().is_a(&FailureKind::IO));
//! assert!(!QuotaExceeded.kind().is_a(&FailureKind::TIMEOUT));
//! ```

use std::fmt;
use std::io;

/// Tag classifying a failure, with an optional parent kind.
///
/// Kinds are compared structurally (name and parent chain), so keep names unique
/// under the same parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FailureKind {
    name: &'static str,
    parent: Option<&'static FailureKind>,
}

impl FailureKind {
    /// Cancellation signal observed by the work itself.
    pub const CANCELLED: FailureKind = FailureKind::root("cancelled");
    /// Programming error (broken invariant, bad argument).
    pub const DEFECT: FailureKind = FailureKind::root("defect");
    /// Unrecoverable runtime condition.
    pub const FATAL: FailureKind = FailureKind::root("fatal");
    /// Input/output failure.
    pub const IO: FailureKind = FailureKind::root("io");
    /// Operation timed out.
    pub const TIMEOUT: FailureKind = FailureKind::subkind_of("timeout", &FailureKind::IO);
    /// Connection refused, reset or aborted.
    pub const CONNECTION: FailureKind = FailureKind::subkind_of("connection", &FailureKind::IO);
    /// Anything unclassified.
    pub const OTHER: FailureKind = FailureKind::root("other");

    /// Creates a kind without a parent.
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Creates a kind that [`is_a`](Self::is_a) `parent`.
    pub const fn subkind_of(name: &'static str, parent: &'static FailureKind) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    /// Returns the kind name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the parent kind, if any.
    pub fn parent(&self) -> Option<&'static FailureKind> {
        self.parent
    }

    /// Returns `true` if `self` equals `other` or descends from it.
    pub fn is_a(&self, other: &FailureKind) -> bool {
        if self == other {
            return true;
        }
        let mut cur = self.parent;
        while let Some(kind) = cur {
            if kind == other {
                return true;
            }
            cur = kind.parent;
        }
        false
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent {
            Some(parent) => write!(f, "{parent}/{}", self.name),
            None => f.write_str(self.name),
        }
    }
}

/// An error that can be evaluated by retry conditions.
pub trait Failure: std::error::Error + Send + Sync + 'static {
    /// Returns the kind used by [`KindIn`](crate::KindIn) matching.
    fn kind(&self) -> &'static FailureKind {
        &FailureKind::OTHER
    }
}

impl Failure for io::Error {
    fn kind(&self) -> &'static FailureKind {
        match io::Error::kind(self) {
            io::ErrorKind::TimedOut => &FailureKind::TIMEOUT,
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted => &FailureKind::CONNECTION,
            _ => &FailureKind::IO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUOTA: FailureKind = FailureKind::subkind_of("quota", &FailureKind::CONNECTION);

    #[test]
    fn test_is_a_walks_parent_chain() {
        assert!(QUOTA.is_a(&QUOTA));
        assert!(QUOTA.is_a(&FailureKind::CONNECTION));
        assert!(QUOTA.is_a(&FailureKind::IO));
        assert!(!QUOTA.is_a(&FailureKind::TIMEOUT));
        assert!(!FailureKind::IO.is_a(&QUOTA));
    }

    #[test]
    fn test_roots_are_unrelated() {
        assert!(!FailureKind::FATAL.is_a(&FailureKind::DEFECT));
        assert!(!FailureKind::CANCELLED.is_a(&FailureKind::OTHER));
    }

    #[test]
    fn test_io_error_mapping() {
        let timeout = io::Error::new(io::ErrorKind::TimedOut, "slow");
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "nope");
        let other = io::Error::other("boom");

        assert_eq!(Failure::kind(&timeout), &FailureKind::TIMEOUT);
        assert_eq!(Failure::kind(&refused), &FailureKind::CONNECTION);
        assert_eq!(Failure::kind(&other), &FailureKind::IO);
    }

    #[test]
    fn test_display_includes_parents() {
        assert_eq!(QUOTA.to_string(), "io/connection/quota");
    }
}
