//! # Pool Property Tests
//!
//! Verifies the partition contract of `Pool<T>`:
//!
//! 1. **Partition**: `0 <= active <= capacity` after every operation
//! 2. **Exhaustion**: the `capacity + 1`-th retrieve fails
//! 3. **Release**: round trips, double releases, resize behavior
//!
//! Run with: cargo test --package novapool_core --test pool_properties

use novapool_core::{Pool, PoolError, PoolHandle, ReleaseFault};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Small wrapper type used to observe clone-on-growth by value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Counter {
    value: i64,
}

// ============================================================================
// PARTITION INVARIANT
// ============================================================================

#[test]
fn partition_holds_for_random_churn() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    let mut pool: Pool<Counter> = Pool::new(16).unwrap();
    let mut held: Vec<PoolHandle> = Vec::new();

    for _ in 0..10_000 {
        if rng.gen_bool(0.55) {
            match pool.retrieve() {
                Ok(handle) => held.push(handle),
                Err(PoolError::PoolExhausted { capacity }) => {
                    assert_eq!(capacity, 16);
                    assert_eq!(held.len(), 16);
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        } else if !held.is_empty() {
            let handle = held.swap_remove(rng.gen_range(0..held.len()));
            pool.release(handle).unwrap();
        }

        assert!(pool.active_count() <= pool.capacity());
        assert_eq!(pool.active_count(), held.len());
        assert_eq!(pool.active_count() + pool.free_count(), pool.capacity());
        assert_eq!(pool.active().len(), pool.active_count());
    }

    // Every handle we still hold resolves, and nothing else is active.
    for &handle in &held {
        assert!(pool.is_active(handle));
    }
    assert_eq!(pool.iter_active().count(), held.len());
}

// ============================================================================
// EXHAUSTION
// ============================================================================

#[test]
fn exhaustion_after_capacity_retrieves() {
    let mut pool: Pool<Counter> = Pool::new(5).unwrap();
    for _ in 0..5 {
        pool.retrieve().unwrap();
    }

    assert_eq!(
        pool.retrieve(),
        Err(PoolError::PoolExhausted { capacity: 5 })
    );
    assert_eq!(pool.active_count(), 5);
    assert_eq!(pool.free_count(), 0);
}

// ============================================================================
// RELEASE
// ============================================================================

#[test]
fn release_round_trip_restores_counts() {
    let mut pool: Pool<Counter> = Pool::new(4).unwrap();
    let _keep = pool.retrieve().unwrap();
    let before = pool.active_count();

    let (handle, counter) = pool.retrieve_mut().unwrap();
    counter.value = 314;
    pool.release(handle).unwrap();

    assert_eq!(pool.active_count(), before);
    assert!(!pool.is_active(handle));

    // The released object sits at the head of the free region and comes back
    // with its state intact.
    let (_, counter) = pool.retrieve_mut().unwrap();
    assert_eq!(counter.value, 314);
}

#[test]
fn double_release_rejected() {
    let mut pool: Pool<Counter> = Pool::new(3).unwrap();
    let a = pool.retrieve().unwrap();
    let _b = pool.retrieve().unwrap();

    pool.release(a).unwrap();
    let cursor = pool.active_count();

    assert_eq!(
        pool.release(a),
        Err(PoolError::InvalidRelease {
            handle: a,
            reason: ReleaseFault::Stale,
        })
    );
    assert_eq!(pool.active_count(), cursor);
}

#[test]
fn handle_from_another_pool_rejected() {
    let mut small: Pool<Counter> = Pool::new(1).unwrap();
    let mut big: Pool<Counter> = Pool::new(8).unwrap();
    let _ = small.retrieve().unwrap();
    let foreign = (0..8).map(|_| big.retrieve().unwrap()).last().unwrap();

    assert!(matches!(
        small.release(foreign),
        Err(PoolError::InvalidRelease {
            reason: ReleaseFault::Unknown,
            ..
        })
    ));
    assert_eq!(small.active_count(), 1);
}

// ============================================================================
// RESIZE
// ============================================================================

#[test]
fn resize_growth_preserves_actives() {
    let mut pool: Pool<Counter> = Pool::new(5).unwrap();
    let handles: Vec<_> = (0..3).map(|_| pool.retrieve().unwrap()).collect();

    pool.resize(8).unwrap();

    assert_eq!(pool.capacity(), 8);
    assert_eq!(pool.active_count(), 3);
    for handle in handles {
        assert!(pool.is_active(handle));
    }
}

#[test]
fn resize_shrink_truncates() {
    let mut pool: Pool<Counter> = Pool::new(5).unwrap();
    for _ in 0..4 {
        pool.retrieve().unwrap();
    }

    pool.resize(2).unwrap();

    assert_eq!(pool.active_count(), 2);
    assert_eq!(pool.capacity(), 2);
    assert_eq!(pool.free_count(), 0);
}

#[test]
fn resize_growth_clones_last_slot() {
    let mut pool: Pool<Counter> = Pool::new(3).unwrap();
    for value in [1, 2, 3] {
        let (_, counter) = pool.retrieve_mut().unwrap();
        counter.value = value;
    }

    pool.resize(7).unwrap();
    for _ in 0..4 {
        let handle = pool.retrieve().unwrap();
        assert_eq!(pool.get(handle), Some(&Counter { value: 3 }));
    }
    assert!(pool.is_exhausted());
}

#[test]
fn resize_zero_rejected() {
    let mut pool: Pool<Counter> = Pool::new(3).unwrap();
    assert!(matches!(
        pool.resize(0),
        Err(PoolError::InvalidArgument { requested: 0, .. })
    ));
    assert_eq!(pool.capacity(), 3);
}

// ============================================================================
// SCENARIO
// ============================================================================

#[test]
fn exhaust_release_retrieve_scenario() {
    let mut pool: Pool<Counter> = Pool::new(3).unwrap();

    let h1 = pool.retrieve().unwrap();
    let h2 = pool.retrieve().unwrap();
    let h3 = pool.retrieve().unwrap();
    assert!(h1 != h2 && h2 != h3 && h1 != h3);

    assert!(matches!(
        pool.retrieve(),
        Err(PoolError::PoolExhausted { .. })
    ));

    pool.release(h2).unwrap();
    assert_eq!(pool.active_count(), 2);
    assert_eq!(pool.free_count(), 1);

    let h4 = pool.retrieve().unwrap();
    assert!(pool.is_active(h4));
    assert!(pool.is_active(h1));
    assert!(pool.is_active(h3));
    assert_eq!(pool.active_count(), 3);
}
