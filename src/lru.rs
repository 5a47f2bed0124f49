//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a fixed-capacity LRU cache with O(1) operations for
//! all cache operations. The cache keeps entries in order of recency of use
//! and evicts the least recently used entry when capacity is reached.
//!
//! # Structure
//!
//! Two tightly coupled parts back every cache front:
//!
//! - a doubly linked [`List`](crate::list) of `(key, value)` pairs ordered
//!   by recency, front = most recently used;
//! - a hash map from key to list handle, giving O(1) existence checks and
//!   node access.
//!
//! The list owns every entry; the map holds only handles into it. Removing
//! a node from the list and removing its key from the map always happen as
//! one compound step, so the two structures describe the same set of
//! entries at every observable point.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: get O(1), put O(1), clear O(n)
//! - **Space Complexity**: O(n) where n is the capacity of the cache
//!
//! # Thread Safety
//!
//! [`LruCache`] is not thread-safe; every operation takes `&mut self`. For
//! concurrent access use
//! [`ConcurrentLruCache`](crate::concurrent::ConcurrentLruCache) (behind
//! the `concurrent` feature), which serializes all access behind a single
//! lock.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::list::{List, NodeRef};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Internal LRU segment containing the actual cache algorithm.
///
/// This is shared between [`LruCache`] (single-threaded) and
/// `ConcurrentLruCache` (multi-threaded). All algorithm logic is
/// implemented here to avoid code duplication.
///
/// Invariant: `map` and `list` always contain exactly the same set of
/// entries. Every mutation that removes a node from one removes the
/// matching entry from the other in the same call.
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, NodeRef, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let map_capacity = cap.get().next_power_of_two();
        LruSegment {
            config: LruCacheConfig { capacity: cap },
            list: List::with_capacity(cap.get()),
            map: HashMap::with_capacity_and_hasher(map_capacity, hash_builder),
            metrics: LruCacheMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Looks up `key`, marking the entry most recently used on a hit.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(node) => {
                self.list.move_to_front(node);
                self.metrics.core.record_hit();
                self.list.get(node).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Like [`get`](Self::get) but returns a mutable reference.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(node) => {
                self.list.move_to_front(node);
                self.metrics.core.record_hit();
                self.list.get_mut(node).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Inserts or refreshes `key`. Returns whether the key already existed.
    ///
    /// An existing key has its value replaced and its entry moved to the
    /// most recently used position; the entry count never changes. A new
    /// key evicts the least recently used entry first when the cache is at
    /// capacity.
    pub(crate) fn put(&mut self, key: K, value: V) -> bool
    where
        K: Clone,
    {
        if let Some(&node) = self.map.get(&key) {
            self.list.move_to_front(node);
            let entry = self.list.get_mut(node);
            debug_assert!(entry.is_some(), "lookup index held a stale handle");
            if let Some(entry) = entry {
                entry.1 = value;
            }
            return true;
        }

        if self.map.len() == self.cap().get() {
            self.evict_back();
        }

        let node = self.list.push_front((key.clone(), value));
        self.map.insert(key, node);
        self.metrics.core.record_insertion();
        false
    }

    /// Removes the back (least recently used) node and its index entry as
    /// one compound step.
    fn evict_back(&mut self) {
        let back = match self.list.back() {
            Some(back) => back,
            None => return,
        };
        if let Some((key, _)) = self.list.remove(back) {
            let removed = self.map.remove(&key);
            debug_assert!(removed.is_some(), "evicted node missing from lookup index");
            self.metrics.core.record_eviction();
        }
    }

    /// Drops every entry, retaining the configured capacity.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

impl<K, V, S> core::fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When the cache reaches
/// capacity, the least recently used entry is evicted to make room for new
/// entries.
///
/// # Examples
///
/// ```
/// use lru_rs::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// // put returns whether the key already existed
/// assert!(!cache.put("apple", 1));
/// assert!(!cache.put("banana", 2));
/// assert!(cache.put("apple", 3));
///
/// // Accessing entries updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&3));
///
/// // Adding beyond capacity evicts the least recently used entry
/// cache.put("cherry", 4);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&3));
/// assert_eq!(cache.get(&"cherry"), Some(&4));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V, DefaultHashBuilder> {
    /// Creates a new LRU cache from a configuration with an optional hasher.
    ///
    /// If `hasher` is `None`, the default hash builder is used.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(config.capacity, hasher.unwrap_or_default())
    }

    /// Creates a new LRU cache that holds at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> Self {
        Self::with_hasher(cap, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self {
            segment: LruSegment::with_hasher(cap, hash_builder),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
    }

    /// Returns the current number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns true if the cache contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns a reference to the value for `key`, marking the entry most
    /// recently used. Absence is a normal outcome, not an error.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Returns a mutable reference to the value for `key`, marking the
    /// entry most recently used.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or refreshes `key`, evicting the least recently used entry
    /// if a new key would exceed capacity.
    ///
    /// Returns `true` if the key already existed (its value was replaced
    /// and its recency refreshed), `false` if a new entry was created.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> bool {
        self.segment.put(key, value)
    }

    /// Removes every entry, retaining the configured capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
