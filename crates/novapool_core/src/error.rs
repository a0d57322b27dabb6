//! # Pool Error Types
//!
//! All errors that can occur while constructing, using, or configuring a pool.
//!
//! Every failing operation leaves the pool untouched: a returned error is
//! always a no-op on internal state.

use crate::pool::PoolHandle;
use thiserror::Error;

/// Why a release was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReleaseFault {
    /// The handle's key was never issued by this pool, or its object was
    /// discarded by a shrinking resize.
    Unknown,
    /// The handle's generation is out of date (already released, or
    /// invalidated by `release_all`).
    Stale,
    /// The object exists but currently sits in the free region.
    NotActive,
}

impl std::fmt::Display for ReleaseFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Unknown => "handle does not belong to this pool",
            Self::Stale => "handle is stale",
            Self::NotActive => "object is not active",
        };
        f.write_str(text)
    }
}

/// Errors that can occur in the pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A constructor or resize was given an unusable capacity.
    #[error("invalid capacity {requested}: {reason}")]
    InvalidArgument {
        /// The capacity that was asked for.
        requested: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Every slot is checked out.
    #[error("pool exhausted: all {capacity} objects are active")]
    PoolExhausted {
        /// Capacity of the exhausted pool.
        capacity: usize,
    },

    /// A handle could not be released.
    #[error("invalid release of {handle:?}: {reason}")]
    InvalidRelease {
        /// The offending handle.
        handle: PoolHandle,
        /// Why it was rejected.
        reason: ReleaseFault,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
