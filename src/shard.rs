use crate::stats::{ShardOps, ShardStats};
use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, TryReserveError};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A single partition: a HashMap protected by its own read-write lock.
///
/// Methods that mutate take the container-wide entry counter so it is only
/// ever adjusted while this partition's write lock is held.
pub(crate) struct Shard<K, V> {
    map: RwLock<HashMap<K, V>>,
    stats: ShardStats,
}

impl<K, V> Shard<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            stats: ShardStats::new(),
        }
    }

    /// Create a partition with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut map = HashMap::new();
        map.try_reserve(capacity)?;
        Ok(Self {
            map: RwLock::new(map),
            stats: ShardStats::new(),
        })
    }

    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        #[cfg(feature = "lock-timing")]
        let started = std::time::Instant::now();
        let guard = self.map.read();
        #[cfg(feature = "lock-timing")]
        self.stats
            .record_lock_wait(started.elapsed().as_nanos() as u64);
        self.stats.record_lock_acquisition();
        guard
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        #[cfg(feature = "lock-timing")]
        let started = std::time::Instant::now();
        let guard = self.map.write();
        #[cfg(feature = "lock-timing")]
        self.stats
            .record_lock_wait(started.elapsed().as_nanos() as u64);
        self.stats.record_lock_acquisition();
        guard
    }

    /// Insert only if the key is absent. An existing value is left untouched.
    pub fn insert_if_absent(&self, key: K, value: V, count: &AtomicUsize) -> bool {
        let mut map = self.write();
        match map.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                count.fetch_add(1, Ordering::Release);
                self.stats.record_insert();
                true
            }
        }
    }

    /// Remove the entry for `key`, returning whether it was present.
    pub fn erase(&self, key: &K, count: &AtomicUsize) -> bool {
        let mut map = self.write();
        if map.remove(key).is_some() {
            count.fetch_sub(1, Ordering::Release);
            self.stats.record_erase();
            true
        } else {
            false
        }
    }

    /// Copy out the value for `key`.
    pub fn find(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let map = self.read();
        let result = map.get(key).cloned();
        if result.is_some() {
            self.stats.record_find();
        }
        result
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.read().contains_key(key)
    }

    /// Drop every entry in this partition, returning how many were removed.
    pub fn clear(&self, count: &AtomicUsize) -> usize {
        let mut map = self.write();
        let removed = map.len();
        map.clear();
        count.fetch_sub(removed, Ordering::Release);
        self.stats.record_clear();
        removed
    }

    /// Visit every value while holding the read lock.
    pub fn for_each<F>(&self, visit: &mut F)
    where
        F: FnMut(&V),
    {
        let map = self.read();
        for value in map.values() {
            visit(value);
        }
    }

    /// Append copies of the values matching `predicate` to `out`.
    pub fn collect_matching<F>(&self, predicate: &mut F, out: &mut Vec<V>)
    where
        F: FnMut(&V) -> bool,
        V: Clone,
    {
        let map = self.read();
        out.extend(map.values().filter(|value| predicate(value)).cloned());
    }

    /// Append copies of every entry to `out`.
    pub fn copy_entries(&self, out: &mut Vec<(K, V)>)
    where
        K: Clone,
        V: Clone,
    {
        let map = self.read();
        out.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn stats(&self) -> ShardOps {
        self.stats.snapshot()
    }
}
