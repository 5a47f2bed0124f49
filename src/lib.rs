#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        LruCache                            │
//! │                                                            │
//! │   ┌─────────────────┐        ┌──────────────────────────┐  │
//! │   │  lookup index   │        │       recency list       │  │
//! │   │  key → handle   │───────▶│  front = MRU, back = LRU │  │
//! │   └─────────────────┘        └──────────────────────────┘  │
//! │                                                            │
//! │   index and list are always mutated together as one step   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The recency list is an arena of index-linked nodes; the index stores
//! generational handles into the arena. A removed node's handle stops
//! resolving, so the index can never dangle.
//!
//! ## Operation Semantics
//!
//! | Operation | Effect | Returns |
//! |-----------|--------|---------|
//! | `put(k, v)` | insert or refresh; evicts LRU entry on overflow | `true` if `k` existed |
//! | `get(&k)` | bump recency on hit | value, or `None` on a miss |
//! | `clear()` | drop all entries, keep capacity | — |
//!
//! Absence is a normal outcome, never an error. A zero capacity is
//! unrepresentable (`NonZeroUsize`). Eviction always removes the entry
//! whose most recent access is furthest in the past.
//!
//! ## Single-threaded
//!
//! ```rust
//! use lru_rs::LruCache;
//! use lru_rs::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ## Concurrent
//!
//! Enable the `concurrent` feature for the thread-safe version:
//!
//! ```toml
//! [dependencies]
//! lru-rs = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ```rust,ignore
//! use lru_rs::ConcurrentLruCache;
//! use lru_rs::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(10_000).unwrap(),
//! };
//! let cache = Arc::new(ConcurrentLruCache::init(config, None));
//!
//! // Safe to share across threads
//! let cache_clone = Arc::clone(&cache);
//! std::thread::spawn(move || {
//!     cache_clone.put("key".to_string(), 42);
//! });
//! ```
//!
//! The concurrent cache serializes every operation behind one mutex, so
//! the LRU order is global and operations are linearizable. See the
//! [`concurrent`] module docs for the reasoning.
//!
//! ## Modules
//!
//! - [`lru`]: the cache implementation
//! - [`config`]: configuration structures
//! - [`metrics`]: metrics collection for cache performance monitoring
//! - [`concurrent`]: thread-safe cache (requires the `concurrent` feature)

#![no_std]

/// Doubly linked list implementation backing the recency order.
///
/// An arena of index-linked nodes with O(1) insertion, removal, and
/// move-to-front through generational handles.
///
/// **Note**: This module is internal infrastructure and is not exposed to
/// library consumers. It has no knowledge of keys or eviction; the cache
/// layers those semantics on top.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-capacity cache that evicts the least recently used
/// entry when the capacity is reached.
pub mod lru;

/// Cache metrics system.
///
/// Provides metrics collection and reporting through the
/// [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

/// Concurrent cache implementation.
///
/// Provides a thread-safe LRU cache guarded by a single lock so the
/// recency order stays global and operations are linearizable.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

// Re-export cache types
pub use lru::LruCache;

pub use metrics::CacheMetrics;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
