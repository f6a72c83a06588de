//! Generic expiring cache with LRU eviction, used to shield the upstream catalog.

use std::{
    collections::HashMap,
    hash::Hash,
    sync::Mutex,
    time::{Duration, Instant},
};

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
    /// Logical clock value of the most recent access or insertion.
    last_used: u64,
    /// Insertion sequence number, used to break LRU ties.
    inserted: u64,
}

struct CacheInner<K, V> {
    map: HashMap<K, CacheEntry<V>>,
    /// Logical clock incremented on every access or insertion.
    tick: u64,
    /// Monotonic insertion counter.
    seq: u64,
}

/// Bounded key/value cache where every entry expires after a fixed TTL.
///
/// When full, inserting a new key evicts the least-recently-used entry;
/// both `get` and `set` count as use, and ties fall to the earliest
/// insertion. Entries past their TTL miss on `get` even if never swept.
pub struct TtlCache<K, V> {
    inner: Mutex<CacheInner<K, V>>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache bounded to `capacity` entries with a uniform `ttl`.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                map: HashMap::new(),
                tick: 0,
                seq: 0,
            }),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Look up `key`, returning a clone of the value if present and unexpired.
    ///
    /// A hit refreshes the entry's LRU position; an expired entry is removed.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        inner.tick += 1;
        let tick = inner.tick;
        let now = Instant::now();

        let expired = match inner.map.get_mut(key) {
            Some(entry) if entry.expires_at > now => {
                entry.last_used = tick;
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.map.remove(key);
        }
        None
    }

    /// Insert or overwrite `key`, marking the entry fresh.
    ///
    /// Inserting a new key beyond capacity evicts the least-recently-used
    /// entry first.
    pub fn set(&self, key: K, value: V) {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        inner.tick += 1;
        inner.seq += 1;
        let (tick, seq) = (inner.tick, inner.seq);

        if !inner.map.contains_key(&key) && inner.map.len() >= self.capacity {
            let victim = inner
                .map
                .iter()
                .min_by_key(|(_, entry)| (entry.last_used, entry.inserted))
                .map(|(k, _)| k.clone());
            if let Some(victim) = victim {
                inner.map.remove(&victim);
            }
        }

        inner.map.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
                last_used: tick,
                inserted: seq,
            },
        );
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn sweep(&self) -> usize {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        let now = Instant::now();
        let before = inner.map.len();
        inner.map.retain(|_, entry| entry.expires_at > now);
        before - inner.map.len()
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache mutex poisoned").map.len()
    }

    /// Whether the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
