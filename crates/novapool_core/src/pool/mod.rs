//! # Object Pool
//!
//! Pre-allocated objects handed out and reclaimed without further allocation.
//!
//! ## Layout
//!
//! ```text
//!  storage:  [ a0 a1 a2 | f0 f1 f2 f3 ]
//!              active    ^ cursor   free
//! ```
//!
//! - Retrieve lends `storage[cursor]` and advances the cursor.
//! - Release swaps the released object with the last active one and moves the
//!   cursor back by one.
//! - Region membership is decided by index alone. Order inside a region is
//!   unspecified and changes on release.

mod handle;
mod registry;

pub use handle::PoolHandle;

use crate::config::PoolConfig;
use crate::error::{PoolError, PoolResult, ReleaseFault};
use registry::Registry;
use std::cmp::Ordering;

/// Capacity used by [`Pool::default`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Largest capacity a pool accepts. Object keys are 32-bit.
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Label attached to log events of pools that were not given one.
pub(crate) const DEFAULT_LABEL: &str = "pool";

/// Checks a requested capacity for construction or resize.
pub(crate) fn validate_capacity(requested: usize) -> PoolResult<()> {
    if requested == 0 {
        return Err(PoolError::InvalidArgument {
            requested,
            reason: "capacity must be greater than zero",
        });
    }
    if requested > MAX_CAPACITY {
        return Err(PoolError::InvalidArgument {
            requested,
            reason: "capacity exceeds u32::MAX",
        });
    }
    Ok(())
}

/// A fixed-capacity pool of reusable objects.
///
/// All objects are created up front. [`retrieve`](Self::retrieve) and
/// [`release`](Self::release) only move the boundary between the active and
/// free regions; they never allocate or drop a `T`.
///
/// Retrieved objects keep whatever state they had when last used. The pool
/// never resets them.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use one pool per thread or wrap in a mutex.
///
/// # Example
///
/// ```rust
/// use novapool_core::Pool;
///
/// #[derive(Clone, Default)]
/// struct Particle { life: f32 }
///
/// let mut pool: Pool<Particle> = Pool::new(1000)?;
///
/// let (handle, particle) = pool.retrieve_mut()?;
/// particle.life = 1.0;
///
/// for particle in pool.active_mut() {
///     particle.life -= 0.1;
/// }
///
/// pool.release(handle)?;
/// # Ok::<(), novapool_core::PoolError>(())
/// ```
#[derive(Debug)]
pub struct Pool<T> {
    /// Pooled objects. `[0, cursor)` is active, `[cursor, len)` is free.
    objects: Vec<T>,
    /// Key of the object in the same slot of `objects`.
    keys: Vec<u32>,
    /// Key -> slot lookup for handles.
    registry: Registry,
    /// Boundary between the active and free regions.
    cursor: usize,
    /// Name used in log events.
    label: String,
}

/// Point-in-time occupancy of a pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total number of slots.
    pub capacity: usize,
    /// Objects currently lent out.
    pub active: usize,
    /// Objects available for retrieval.
    pub free: usize,
}

impl std::fmt::Display for PoolStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "capacity={} active={} free={}",
            self.capacity, self.active, self.free
        )
    }
}

impl<T> Pool<T> {
    /// Builds a pool over already-created objects. Capacity must be valid.
    fn from_objects(objects: Vec<T>, label: String) -> Self {
        let mut registry = Registry::with_capacity(objects.len());
        let keys = (0..objects.len()).map(|slot| registry.issue(slot)).collect();

        tracing::debug!(pool = %label, capacity = objects.len(), "pool created");

        Self {
            objects,
            keys,
            registry,
            cursor: 0,
            label,
        }
    }

    /// Creates a pool of `capacity` default-constructed objects.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidArgument`] if `capacity` is zero or exceeds
    /// [`MAX_CAPACITY`].
    pub fn new(capacity: usize) -> PoolResult<Self>
    where
        T: Default,
    {
        validate_capacity(capacity)?;
        Ok(Self::from_objects(
            (0..capacity).map(|_| T::default()).collect(),
            DEFAULT_LABEL.to_owned(),
        ))
    }

    /// Creates a pool of `capacity` independent clones of `template`.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidArgument`] if `capacity` is zero or exceeds
    /// [`MAX_CAPACITY`].
    pub fn from_template(template: &T, capacity: usize) -> PoolResult<Self>
    where
        T: Clone,
    {
        validate_capacity(capacity)?;
        Ok(Self::from_objects(
            vec![template.clone(); capacity],
            DEFAULT_LABEL.to_owned(),
        ))
    }

    /// Creates a pool of default-constructed objects sized by `config`.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidArgument`] if the configured capacity is invalid.
    pub fn from_config(config: &PoolConfig) -> PoolResult<Self>
    where
        T: Default,
    {
        Ok(Self::new(config.capacity)?.with_label(config.label.clone()))
    }

    /// Sets the name used in this pool's log events.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the name used in this pool's log events.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.objects.len()
    }

    /// Returns the number of objects currently lent out.
    #[inline]
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.cursor
    }

    /// Returns the number of objects available for retrieval.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.cursor
    }

    /// Returns `true` when every object is lent out.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.capacity()
    }

    /// Returns a snapshot of the pool's occupancy.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.capacity(),
            active: self.active_count(),
            free: self.free_count(),
        }
    }

    /// Lends out the next free object.
    ///
    /// This is a **O(1)** operation with **zero heap allocations**. The
    /// object is not reset.
    ///
    /// # Errors
    ///
    /// [`PoolError::PoolExhausted`] if no object is free. Nothing changes.
    pub fn retrieve(&mut self) -> PoolResult<PoolHandle> {
        if self.is_exhausted() {
            tracing::trace!(pool = %self.label, capacity = self.capacity(), "retrieve on exhausted pool");
            return Err(PoolError::PoolExhausted {
                capacity: self.capacity(),
            });
        }

        let key = self.keys[self.cursor];
        self.cursor += 1;

        tracing::trace!(pool = %self.label, key, active = self.cursor, "retrieved");
        Ok(PoolHandle::new(key, self.registry.generation(key)))
    }

    /// Lends out the next free object together with mutable access to it.
    ///
    /// # Errors
    ///
    /// [`PoolError::PoolExhausted`] if no object is free. Nothing changes.
    pub fn retrieve_mut(&mut self) -> PoolResult<(PoolHandle, &mut T)> {
        let handle = self.retrieve()?;
        let slot = self.cursor - 1;
        Ok((handle, &mut self.objects[slot]))
    }

    /// Returns a lent-out object to the free region.
    ///
    /// The object swaps places with the last active object and the cursor
    /// moves back by one. The handle, and every copy of it, becomes stale.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidRelease`] if the handle is unknown, stale, or
    /// names a free object. Nothing changes.
    pub fn release(&mut self, handle: PoolHandle) -> PoolResult<()> {
        let slot = match self.resolve(handle) {
            Ok(slot) => slot,
            Err(reason) => {
                tracing::warn!(pool = %self.label, ?handle, %reason, "rejected release");
                return Err(PoolError::InvalidRelease { handle, reason });
            }
        };

        // resolve() only succeeds for slot < cursor, so cursor >= 1 here.
        let last = self.cursor - 1;
        self.swap_slots(slot, last);
        self.registry.bump(handle.key());
        self.cursor = last;

        tracing::trace!(pool = %self.label, ?handle, active = self.cursor, "released");
        Ok(())
    }

    /// Returns every lent-out object to the free region at once.
    ///
    /// All outstanding handles become stale. Objects are not reset.
    pub fn release_all(&mut self) {
        for &key in &self.keys[..self.cursor] {
            self.registry.bump(key);
        }
        tracing::debug!(pool = %self.label, released = self.cursor, "released all");
        self.cursor = 0;
    }

    /// Changes the capacity.
    ///
    /// - Growing keeps every object where it is and appends clones of the
    ///   object in the old last slot.
    /// - Shrinking drops the objects in `[new_capacity, capacity)`.
    ///
    /// If more objects are active than the new capacity allows, the active
    /// count is clamped to `new_capacity`. Active objects past the new bound
    /// are dropped without notice and their handles become invalid.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidArgument`] if `new_capacity` is zero or exceeds
    /// [`MAX_CAPACITY`]. Nothing changes.
    pub fn resize(&mut self, new_capacity: usize) -> PoolResult<()>
    where
        T: Clone,
    {
        validate_capacity(new_capacity)?;

        let old_capacity = self.capacity();
        match new_capacity.cmp(&old_capacity) {
            Ordering::Greater => {
                // Capacity is at least one, so there is always a last object.
                let template = self.objects[old_capacity - 1].clone();
                self.objects.resize(new_capacity, template);
                self.keys.reserve_exact(new_capacity - old_capacity);
                for slot in old_capacity..new_capacity {
                    let key = self.registry.issue(slot);
                    self.keys.push(key);
                }
                debug_assert!(self.registry.len() <= MAX_CAPACITY);
            }
            Ordering::Less => {
                let truncated = self.cursor.saturating_sub(new_capacity);
                if truncated > 0 {
                    tracing::warn!(
                        pool = %self.label,
                        truncated,
                        new_capacity,
                        "shrink dropped active objects"
                    );
                }

                for key in self.keys.drain(new_capacity..) {
                    self.registry.vacate(key);
                }
                self.objects.truncate(new_capacity);
                self.cursor = self.cursor.min(new_capacity);
            }
            Ordering::Equal => {}
        }

        tracing::debug!(
            pool = %self.label,
            old_capacity,
            new_capacity,
            active = self.cursor,
            "pool resized"
        );
        Ok(())
    }

    /// Gets a reference to an active object.
    ///
    /// # Arguments
    ///
    /// * `handle` - The handle to look up
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        let slot = self.resolve(handle).ok()?;
        self.objects.get(slot)
    }

    /// Gets a mutable reference to an active object.
    ///
    /// # Arguments
    ///
    /// * `handle` - The handle to look up
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        let slot = self.resolve(handle).ok()?;
        self.objects.get_mut(slot)
    }

    /// Checks whether `handle` names an object that is currently lent out.
    #[inline]
    #[must_use]
    pub fn is_active(&self, handle: PoolHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Returns the active region as a slice.
    ///
    /// The slice length is the active count. It is a view of live storage,
    /// not a copy, so the borrow ends before the pool can be mutated again.
    #[inline]
    #[must_use]
    pub fn active(&self) -> &[T] {
        &self.objects[..self.cursor]
    }

    /// Returns the active region as a mutable slice.
    #[inline]
    pub fn active_mut(&mut self) -> &mut [T] {
        &mut self.objects[..self.cursor]
    }

    /// Iterates over active objects along with their current handles.
    pub fn iter_active(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        let registry = &self.registry;
        self.keys[..self.cursor]
            .iter()
            .zip(&self.objects[..self.cursor])
            .map(move |(&key, object)| (PoolHandle::new(key, registry.generation(key)), object))
    }

    /// Finds the slot of an active object.
    fn resolve(&self, handle: PoolHandle) -> Result<usize, ReleaseFault> {
        if handle.is_null() {
            return Err(ReleaseFault::Unknown);
        }
        let slot = self.registry.locate(handle)?;
        if slot >= self.cursor {
            return Err(ReleaseFault::NotActive);
        }
        Ok(slot)
    }

    /// Swaps two slots and keeps the registry in step.
    fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.objects.swap(a, b);
        self.keys.swap(a, b);
        self.registry.move_to(self.keys[a], a);
        self.registry.move_to(self.keys[b], b);
    }
}

impl<T: Default> Default for Pool<T> {
    /// Creates a pool of [`DEFAULT_CAPACITY`] default-constructed objects.
    fn default() -> Self {
        Self::from_objects(
            (0..DEFAULT_CAPACITY).map(|_| T::default()).collect(),
            DEFAULT_LABEL.to_owned(),
        )
    }
}
