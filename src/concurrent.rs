//! Concurrent LRU Cache Implementation
//!
//! A thread-safe LRU cache guarded by a single `parking_lot::Mutex`. This is
//! the multi-threaded counterpart to [`LruCache`](crate::LruCache).
//!
//! # One Lock over the Whole State
//!
//! The lookup index and the recency list form one aggregate: every operation
//! mutates both, and the invariant "index and list agree" must never be
//! observable mid-update. A single mutex over the whole segment guarantees
//! that; decomposing into finer-grained locks (one for the index, one for
//! the list) would reintroduce exactly that torn-invariant window. Sharding
//! the key space across several locks is equally off the table here: the
//! eviction victim must be the *globally* least recently used entry, and a
//! per-shard list can only approximate that.
//!
//! Holding one lock is affordable because every operation is O(1) and does
//! no I/O while the lock is held, so critical sections are short and
//! bounded. The result is linearizability for free: only one call touches
//! shared state at a time, so any concurrent history is equivalent to some
//! sequential one.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! LRU requires **mutable access even for read operations**: every `get`
//! moves the accessed entry to the front of the recency list. Since `get`
//! is inherently a write, an `RwLock` would provide no read parallelism,
//! only extra bookkeeping. `parking_lot::Mutex` is smaller and faster than
//! the std mutex and has no poisoning: a panic inside the critical section
//! (which would indicate a defect, not a recoverable state) leaves the
//! cache unusable rather than observably inconsistent.
//!
//! # Example
//!
//! ```rust,ignore
//! use lru_rs::ConcurrentLruCache;
//! use lru_rs::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(10_000).unwrap(),
//! };
//! let cache = Arc::new(ConcurrentLruCache::init(config, None));
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for j in 0..1000 {
//!             cache.put(format!("key-{}-{}", i, j), j);
//!         }
//!     })
//! }).collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! println!("Total entries: {}", cache.len());
//! ```

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::lru::LruSegment;
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LRU cache with one mutex guarding the whole state.
///
/// All operations take `&self`, acquire the lock for their full duration
/// via a scoped guard (released on every exit path), and perform the index
/// and list mutations as one atomic step. Operations are linearizable.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type. `Clone` is needed only for [`get`](Self::get), which
///   hands the caller a copy; [`get_with`](Self::get_with) works without it.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Value Sharing
///
/// [`get`](Self::get) returns a **clone** of the stored value. Callers must
/// not assume a value read from the cache can be mutated in place: a
/// concurrent `put` may replace it at any time.
///
/// # Example
///
/// ```rust,ignore
/// use lru_rs::ConcurrentLruCache;
/// use lru_rs::config::LruCacheConfig;
/// use core::num::NonZeroUsize;
/// use std::sync::Arc;
///
/// let config = LruCacheConfig {
///     capacity: NonZeroUsize::new(1000).unwrap(),
/// };
/// let cache = Arc::new(ConcurrentLruCache::init(config, None));
///
/// cache.put("key".to_string(), 42);
/// assert_eq!(cache.get(&"key".to_string()), Some(42));
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    segment: Mutex<LruSegment<K, V, S>>,
}

impl<K, V> ConcurrentLruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
{
    /// Creates a new concurrent LRU cache from a configuration with an
    /// optional hasher.
    ///
    /// If `hasher` is `None`, the default hash builder is used.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Creates a concurrent LRU cache with a custom hash builder.
    ///
    /// Use this for deterministic hashing or DoS-resistant hashers.
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: Mutex::new(LruSegment::with_hasher(config.capacity, hash_builder)),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    pub fn capacity(&self) -> NonZeroUsize {
        self.segment.lock().cap()
    }

    /// Returns the current number of entries.
    ///
    /// The value is exact at the moment the lock is held but may be stale
    /// by the time the caller observes it.
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Retrieves a value from the cache.
    ///
    /// Returns a **clone** of the value so the lock is not held after the
    /// call returns. For reads that do not need ownership, use
    /// [`get_with`](Self::get_with) instead.
    ///
    /// A hit moves the entry to the most recently used position; a miss is
    /// a normal outcome signalled by `None`, not an error.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        let mut segment = self.segment.lock();
        segment.get(key).cloned()
    }

    /// Retrieves a value and applies a function to it while holding the
    /// lock.
    ///
    /// More efficient than [`get`](Self::get) when only a borrow is needed,
    /// as it avoids cloning. `f` must not block or perform I/O; the lock is
    /// held until it returns.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let mut segment = self.segment.lock();
        segment.get(key).map(f)
    }

    /// Inserts or refreshes `key`, evicting the least recently used entry
    /// if a new key would exceed capacity.
    ///
    /// Returns `true` if the key already existed (its value was replaced
    /// and its recency refreshed), `false` if a new entry was created.
    pub fn put(&self, key: K, value: V) -> bool {
        let mut segment = self.segment.lock();
        segment.put(key, value)
    }

    /// Checks if the cache contains a key.
    ///
    /// Note: this **does** update the entry's recency (moves it to the most
    /// recently used position), like any other access.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut segment = self.segment.lock();
        segment.get(key).is_some()
    }

    /// Removes every entry, retaining the configured capacity.
    pub fn clear(&self) {
        self.segment.lock().clear();
    }
}

impl<K, V, S> CacheMetrics for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LruCacheConfig;

    extern crate std;
    use std::string::ToString;
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    fn make_config(capacity: usize) -> LruCacheConfig {
        LruCacheConfig {
            capacity: NonZeroUsize::new(capacity).unwrap(),
        }
    }

    #[test]
    fn test_basic_operations() {
        let cache: ConcurrentLruCache<String, i32> =
            ConcurrentLruCache::init(make_config(100), None);

        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);

        assert!(!cache.put("a".to_string(), 1));
        assert!(!cache.put("b".to_string(), 2));
        assert!(!cache.put("c".to_string(), 3));

        assert_eq!(cache.len(), 3);
        assert!(!cache.is_empty());

        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.get(&"b".to_string()), Some(2));
        assert_eq!(cache.get(&"c".to_string()), Some(3));
        assert_eq!(cache.get(&"d".to_string()), None);
    }

    #[test]
    fn test_put_reports_existing_key() {
        let cache: ConcurrentLruCache<String, i32> =
            ConcurrentLruCache::init(make_config(100), None);

        assert!(!cache.put("key".to_string(), 1));
        assert!(cache.put("key".to_string(), 2));
        assert_eq!(cache.get(&"key".to_string()), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_with() {
        let cache: ConcurrentLruCache<String, String> =
            ConcurrentLruCache::init(make_config(100), None);

        cache.put("key".to_string(), "hello world".to_string());

        let len = cache.get_with(&"key".to_string(), |v: &String| v.len());
        assert_eq!(len, Some(11));

        let missing = cache.get_with(&"missing".to_string(), |v: &String| v.len());
        assert_eq!(missing, None);
    }

    #[test]
    fn test_clear() {
        let cache: ConcurrentLruCache<String, i32> =
            ConcurrentLruCache::init(make_config(100), None);

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("c".to_string(), 3);

        assert_eq!(cache.len(), 3);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a".to_string()), None);
    }

    #[test]
    fn test_contains_key() {
        let cache: ConcurrentLruCache<String, i32> =
            ConcurrentLruCache::init(make_config(100), None);

        cache.put("exists".to_string(), 1);

        assert!(cache.contains_key(&"exists".to_string()));
        assert!(!cache.contains_key(&"missing".to_string()));
    }

    #[test]
    fn test_eviction_on_capacity() {
        let cache: ConcurrentLruCache<String, i32> = ConcurrentLruCache::init(make_config(3), None);

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("c".to_string(), 3);
        assert_eq!(cache.len(), 3);

        // "a" is the least recently used entry, so it goes first.
        cache.put("d".to_string(), 4);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.get(&"d".to_string()), Some(4));
    }

    #[test]
    fn test_lru_ordering_is_global() {
        let cache: ConcurrentLruCache<String, i32> = ConcurrentLruCache::init(make_config(3), None);

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("c".to_string(), 3);

        // Touch "a" so "b" becomes the oldest entry.
        let _ = cache.get(&"a".to_string());
        cache.put("d".to_string(), 4);

        assert_eq!(cache.get(&"b".to_string()), None);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.get(&"d".to_string()), Some(4));
    }

    #[test]
    fn test_concurrent_access() {
        let cache: Arc<ConcurrentLruCache<String, usize>> =
            Arc::new(ConcurrentLruCache::init(make_config(1000), None));
        let num_threads = 8;
        let ops_per_thread = 1000;

        let mut handles: Vec<std::thread::JoinHandle<()>> = Vec::new();

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("thread_{}_key_{}", t, i);
                    cache.put(key.clone(), t * 1000 + i);
                    let _ = cache.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(!cache.is_empty());
        assert!(cache.len() <= 1000);
    }

    #[test]
    fn test_concurrent_mixed_operations() {
        let cache: Arc<ConcurrentLruCache<String, usize>> =
            Arc::new(ConcurrentLruCache::init(make_config(100), None));
        let num_threads = 8;
        let ops_per_thread = 500;

        let mut handles: Vec<std::thread::JoinHandle<()>> = Vec::new();

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("key_{}", i % 200);

                    match i % 3 {
                        0 => {
                            cache.put(key, i);
                        }
                        1 => {
                            let _ = cache.get(&key);
                        }
                        2 => {
                            let _ = cache.get_with(&key, |v: &usize| *v);
                        }
                        _ => unreachable!(),
                    }

                    if i == 250 && t == 0 {
                        cache.clear();
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 100);
    }

    #[test]
    fn test_init_with_hasher() {
        let hasher = DefaultHashBuilder::default();
        let cache: ConcurrentLruCache<String, i32, _> =
            ConcurrentLruCache::init_with_hasher(make_config(100), hasher);

        cache.put("test".to_string(), 42);
        assert_eq!(cache.get(&"test".to_string()), Some(42));
    }

    #[test]
    fn test_borrowed_key_lookup() {
        let cache: ConcurrentLruCache<String, i32> =
            ConcurrentLruCache::init(make_config(100), None);

        cache.put("test_key".to_string(), 42);

        let key_str = "test_key";
        assert_eq!(cache.get(key_str), Some(42));
        assert!(cache.contains_key(key_str));
    }

    #[test]
    fn test_metrics() {
        let cache: ConcurrentLruCache<String, i32> =
            ConcurrentLruCache::init(make_config(100), None);

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        let _ = cache.get(&"a".to_string());
        let _ = cache.get(&"missing".to_string());

        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("cache_misses"), Some(&1.0));
        assert_eq!(metrics.get("insertions"), Some(&2.0));
        assert_eq!(cache.algorithm_name(), "ConcurrentLRU");
    }

    #[test]
    fn test_empty_cache_operations() {
        let cache: ConcurrentLruCache<String, i32> =
            ConcurrentLruCache::init(make_config(100), None);

        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&"missing".to_string()), None);
        assert!(!cache.contains_key(&"missing".to_string()));

        let result = cache.get_with(&"missing".to_string(), |v: &i32| *v);
        assert_eq!(result, None);
    }
}
