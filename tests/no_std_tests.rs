#![no_std]
extern crate alloc;
extern crate lru_rs;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::num::NonZeroUsize;
use lru_rs::config::LruCacheConfig;
use lru_rs::LruCache;

// Helper to create a cache with the init pattern
fn make_lru<K: core::hash::Hash + Eq + Clone, V: Clone>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

#[test]
fn test_lru_in_no_std() {
    let mut cache = make_lru(2);

    // Using String as it requires the alloc crate
    let key1 = String::from("key1");
    let key2 = String::from("key2");
    let key3 = String::from("key3");

    cache.put(key1.clone(), 1);
    cache.put(key2.clone(), 2);

    assert_eq!(*cache.get(&key1).unwrap(), 1);
    assert_eq!(*cache.get(&key2).unwrap(), 2);

    // This should evict key1
    cache.put(key3.clone(), 3);

    assert!(cache.get(&key1).is_none());
    assert_eq!(*cache.get(&key2).unwrap(), 2);
    assert_eq!(*cache.get(&key3).unwrap(), 3);
}

#[test]
fn test_lru_eviction_order_in_no_std() {
    let mut cache = make_lru(3);

    let keys: Vec<String> = (0..4).map(|i| format!("key{i}")).collect();

    cache.put(keys[0].clone(), 0);
    cache.put(keys[1].clone(), 1);
    cache.put(keys[2].clone(), 2);

    // Touch key0 so key1 becomes the eviction candidate
    cache.get(&keys[0]);
    cache.put(keys[3].clone(), 3);

    assert!(cache.get(&keys[1]).is_none());
    assert_eq!(*cache.get(&keys[0]).unwrap(), 0);
    assert_eq!(*cache.get(&keys[2]).unwrap(), 2);
    assert_eq!(*cache.get(&keys[3]).unwrap(), 3);
}

#[test]
fn test_lru_put_and_clear_in_no_std() {
    let mut cache = make_lru(2);

    let key = String::from("key");
    assert!(!cache.put(key.clone(), 1));
    assert!(cache.put(key.clone(), 2));
    assert_eq!(*cache.get(&key).unwrap(), 2);

    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.get(&key).is_none());
}
