//! # Pool Handles
//!
//! Handles are lightweight identifiers consisting of:
//! - A key naming one pooled object (stable while the object lives)
//! - A generation counter for detecting stale or repeated releases

/// Identifier for an object lent out by a [`Pool`](super::Pool).
///
/// The ID is split into two parts:
/// - Lower 32 bits: key of the pooled object
/// - Upper 32 bits: generation the object had when it was retrieved
///
/// The key follows the object, not the slot: a release may swap objects
/// between slots, but every outstanding handle keeps resolving to the same
/// object until that object itself is released.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PoolHandle(u64);

impl PoolHandle {
    /// Creates a handle from key and generation.
    ///
    /// # Arguments
    ///
    /// * `key` - The object key (0 to 2^32-1)
    /// * `generation` - The generation counter (0 to 2^32-1)
    #[inline]
    #[must_use]
    pub const fn new(key: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (key as u64))
    }

    /// Returns the key portion of the handle.
    #[inline]
    #[must_use]
    pub const fn key(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the handle.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Null/invalid handle. Never issued by a pool.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this handle is null.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }

    /// Returns the packed representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

impl Default for PoolHandle {
    fn default() -> Self {
        Self::NULL
    }
}

impl std::fmt::Debug for PoolHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return f.write_str("PoolHandle(NULL)");
        }
        write!(f, "PoolHandle({}v{})", self.key(), self.generation())
    }
}
