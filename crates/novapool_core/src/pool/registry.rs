//! # Handle Registry
//!
//! Maps object keys to the slot each object currently occupies.
//!
//! Releases swap objects between slots, so a handle cannot name a slot
//! directly. Instead every object gets a key when it is created and the
//! registry follows it around. Each entry also carries the generation used to
//! reject stale handles.

use super::handle::PoolHandle;
use crate::error::ReleaseFault;

/// One registry entry.
#[derive(Clone, Copy, Debug)]
struct Entry {
    /// Current slot of the object, `None` once the object was discarded.
    slot: Option<usize>,
    /// Bumped every time the object leaves the active region.
    generation: u32,
}

/// Key -> slot table with recycling of discarded keys.
#[derive(Debug, Default)]
pub(super) struct Registry {
    entries: Vec<Entry>,
    /// Keys whose objects were discarded by a shrink.
    vacant: Vec<u32>,
}

impl Registry {
    /// Creates an empty registry with room for `capacity` keys.
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    /// Issues a key for a new object placed at `slot`.
    ///
    /// Vacated keys are reused first; their generation was already bumped
    /// when they were vacated, so handles to the discarded object stay stale.
    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn issue(&mut self, slot: usize) -> u32 {
        if let Some(key) = self.vacant.pop() {
            self.entries[key as usize].slot = Some(slot);
            return key;
        }

        // Pool capacity is capped at u32::MAX, so keys never reach the NULL key.
        let key = self.entries.len() as u32;
        self.entries.push(Entry {
            slot: Some(slot),
            generation: 0,
        });
        key
    }

    /// Current generation of `key`.
    #[inline]
    pub(super) fn generation(&self, key: u32) -> u32 {
        self.entries
            .get(key as usize)
            .map_or(0, |entry| entry.generation)
    }

    /// Resolves a handle to the slot of its object.
    pub(super) fn locate(&self, handle: PoolHandle) -> Result<usize, ReleaseFault> {
        let entry = self
            .entries
            .get(handle.key() as usize)
            .ok_or(ReleaseFault::Unknown)?;

        if entry.generation != handle.generation() {
            // Discarded objects report as unknown, live ones as stale.
            return Err(if entry.slot.is_some() {
                ReleaseFault::Stale
            } else {
                ReleaseFault::Unknown
            });
        }

        entry.slot.ok_or(ReleaseFault::Unknown)
    }

    /// Records that the object `key` now lives at `slot`.
    #[inline]
    pub(super) fn move_to(&mut self, key: u32, slot: usize) {
        if let Some(entry) = self.entries.get_mut(key as usize) {
            entry.slot = Some(slot);
        }
    }

    /// Invalidates every handle issued so far for `key`.
    #[inline]
    pub(super) fn bump(&mut self, key: u32) {
        if let Some(entry) = self.entries.get_mut(key as usize) {
            entry.generation = entry.generation.wrapping_add(1);
        }
    }

    /// Forgets the object behind `key` and queues the key for reuse.
    pub(super) fn vacate(&mut self, key: u32) {
        if let Some(entry) = self.entries.get_mut(key as usize) {
            entry.slot = None;
            entry.generation = entry.generation.wrapping_add(1);
            self.vacant.push(key);
        }
    }

    /// Number of keys ever issued (live or vacant).
    #[inline]
    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}
