//! LRU (Least Recently Used) cache implementation
//!
//! A key map points straight at nodes of a recency list, so lookups,
//! move-to-front and tail eviction are all O(1). Map and list are guarded
//! together by one mutex, held only for the map and list work; logging and
//! dropping evicted entries happen after it is released.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::list::{NodeId, OrderedList};
use crate::stats::CacheStats;
use crate::traits::Cache;

/// Upper bound on slots reserved up front; larger caches grow on demand
const PREALLOC_LIMIT: usize = 1024;

/// State that must only change under the lock
struct State<K, V> {
    map: HashMap<K, NodeId, RandomState>,
    list: OrderedList<K, V>,
}

/// Thread-safe LRU cache with fixed capacity
///
/// Once full, inserting a new key evicts the entry that has gone longest
/// without a successful [`get`](Cache::get) or [`put`](Cache::put).
///
/// # Example
/// ```
/// use lrucache::{Cache, LruCache};
///
/// let cache = LruCache::new(2).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a").unwrap();
/// cache.put("c", 3);
///
/// assert!(cache.get(&"b").unwrap_err().is_not_found());
/// assert_eq!(cache.get(&"a"), Ok(1));
/// ```
pub struct LruCache<K, V> {
    state: Mutex<State<K, V>>,
    stats: CacheStats,
    capacity: usize,
    name: Option<String>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` - Capacity is zero
    pub fn new(capacity: usize) -> Result<Self> {
        Self::from_config(&CacheConfig::new(capacity))
    }

    /// Create a new LRU cache from a config
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;

        debug!(cache = ?config.name, capacity = config.capacity, "creating LRU cache");

        let reserve = config.capacity.min(PREALLOC_LIMIT);
        Ok(Self {
            state: Mutex::new(State {
                map: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
                list: OrderedList::with_capacity(reserve),
            }),
            stats: CacheStats::new(),
            capacity: config.capacity,
            name: config.name.clone(),
        })
    }

    /// Get a value without marking it as recently used
    pub fn peek(&self, key: &K) -> Option<V> {
        let state = self.state.lock();
        state.map.get(key).map(|&id| state.list.value(id).clone())
    }

    /// Check for a key without marking it as recently used
    pub fn contains(&self, key: &K) -> bool {
        self.state.lock().map.contains_key(key)
    }

    /// Remove a key from the cache
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let id = state.map.remove(key)?;
        let (_, value) = state.list.remove(id);
        Some(value)
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> Vec<K> {
        let state = self.state.lock();
        state.list.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Clear the cache (statistics are kept)
    pub fn clear(&self) {
        {
            let mut state = self.state.lock();
            state.map.clear();
            state.list.clear();
        }
        debug!(cache = ?self.name, "cleared LRU cache");
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.state.lock().list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.state.lock().list.is_empty()
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Verify map and list agree with each other and with the capacity
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
        let state = self.state.lock();
        state.list.check_links()?;

        if state.map.len() != state.list.len() {
            return Err(format!(
                "map holds {} keys, list holds {} nodes",
                state.map.len(),
                state.list.len()
            ));
        }
        if state.list.len() > self.capacity {
            return Err(format!(
                "{} entries exceed capacity {}",
                state.list.len(),
                self.capacity
            ));
        }
        for (key, _) in state.list.iter() {
            match state.map.get(key) {
                Some(&id) if state.list.key(id) == key => {}
                Some(_) => return Err("map points a key at another key's node".to_string()),
                None => return Err("listed key missing from map".to_string()),
            }
        }
        Ok(())
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn get(&self, key: &K) -> Result<V> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        match state.map.get(key) {
            Some(&id) => {
                state.list.move_to_front(id);
                self.stats.record_hit();
                Ok(state.list.value(id).clone())
            }
            None => {
                self.stats.record_miss();
                Err(Error::NotFound)
            }
        }
    }

    fn put(&self, key: K, value: V) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if let Some(&id) = state.map.get(&key) {
            *state.list.value_mut(id) = value;
            state.list.move_to_front(id);
            self.stats.record_update();
            return;
        }

        let id = state.list.push_front(key.clone(), value);
        state.map.insert(key, id);
        self.stats.record_insert();

        // A new key grows the cache by one, so one eviction restores the bound
        if state.list.len() <= self.capacity {
            return;
        }
        let evicted = state.list.pop_back();
        if let Some((key, _)) = &evicted {
            state.map.remove(key);
            self.stats.record_eviction();
        }
        let len = state.list.len();
        drop(guard);

        // Evicted entry and log output are both handled outside the lock
        if evicted.is_some() {
            trace!(cache = ?self.name, len, "evicted least recently used entry");
        }
        drop(evicted);
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("name", &self.name)
            .field("len", &self.state.lock().list.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
