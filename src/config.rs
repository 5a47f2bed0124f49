//! Cache Configuration
//!
//! Configuration for the LRU cache, following a plain-struct philosophy:
//!
//! - **Simple**: just create the struct with all fields set
//! - **Type safety**: capacity is a [`NonZeroUsize`], so an empty cache is
//!   unrepresentable and no runtime validation is needed
//! - **No boilerplate**: no constructors or builder methods
//!
//! # Examples
//!
//! ```
//! use lru_rs::config::LruCacheConfig;
//! use lru_rs::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed entry when the cache reaches
/// capacity.
///
/// # Fields
///
/// - `capacity`: maximum number of entries the cache can hold. Capacity is a
///   fixed entry count chosen at construction; the cache does not account
///   for value sizes in bytes. A non-positive capacity is a contract
///   violation, which the `NonZeroUsize` type rules out at compile time.
#[derive(Clone, Copy)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
