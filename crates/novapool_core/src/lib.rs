//! # NOVAPOOL Core
//!
//! Fixed-capacity object pool for frequently reused objects
//! (game entities, particles, network buffers).
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations on retrieve / release** - All objects are created up front
//! 2. **Partitioned storage** - Active objects sit in `[0, cursor)`, free ones after
//! 3. **Handles, not pointers** - Generation-tagged handles catch stale and double releases
//!
//! ## Example
//!
//! ```rust
//! use novapool_core::{Pool, PoolError};
//!
//! let mut pool: Pool<u64> = Pool::new(3)?;
//! let a = pool.retrieve()?;
//! let _b = pool.retrieve()?;
//! let _c = pool.retrieve()?;
//! assert!(matches!(pool.retrieve(), Err(PoolError::PoolExhausted { .. })));
//!
//! pool.release(a)?;
//! assert_eq!(pool.free_count(), 1);
//! # Ok::<(), PoolError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod pool;

pub use config::PoolConfig;
pub use error::{PoolError, PoolResult, ReleaseFault};
pub use pool::{Pool, PoolHandle, PoolStats, DEFAULT_CAPACITY, MAX_CAPACITY};
