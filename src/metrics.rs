//! Cache Metrics System
//!
//! Provides a metrics collection and reporting system using BTreeMap-based
//! reporting. The cache tracks its counters internally and exposes them
//! through the common [`CacheMetrics`] trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! - **Deterministic ordering**: metrics always appear in consistent order
//! - **Reproducible output**: essential for testing and benchmark comparisons
//! - **Stable serialization**: exports have predictable key ordering
//!
//! The performance difference (O(log n) vs O(1)) is negligible with a
//! handful of metric keys.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Common counters tracked by the cache.
///
/// Capacity is an entry count in this crate, so the counters are entry
/// counts too; there is no byte accounting.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of requests (gets) made to the cache
    pub requests: u64,

    /// Number of requests that resulted in cache hits
    pub cache_hits: u64,

    /// Number of entries evicted due to the capacity limit
    pub evictions: u64,

    /// Number of new entries inserted into the cache
    pub insertions: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed counter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cache hit - the requested key was found in the cache.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a cache miss - the requested key was not in the cache.
    ///
    /// Misses are also derivable as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an eviction - an entry was removed to stay within capacity.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an insertion - a new entry was written to the cache.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Cache hit rate as a fraction between 0.0 and 1.0, or 0.0 if no
    /// requests have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Cache miss rate as a fraction between 0.0 and 1.0, or 0.0 if no
    /// requests have been made.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// LRU-specific metrics (extends [`CoreCacheMetrics`]).
///
/// LRU has no algorithm-specific counters beyond the core set, but the
/// wrapper keeps the reporting surface uniform should any be added.
#[derive(Debug, Default, Clone)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache fronts
    pub core: CoreCacheMetrics,
}

impl LruCacheMetrics {
    /// Creates a zeroed metrics set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        self.core.to_btreemap()
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

/// Trait implemented by every cache front for metrics reporting.
///
/// Uses BTreeMap to ensure deterministic ordering of metrics, which is
/// essential for reproducible benchmarks and consistent test results.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g. "LRU").
    fn algorithm_name(&self) -> &'static str;
}
