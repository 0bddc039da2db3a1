use crate::config::{create_hasher, Config, DEFAULT_PARTITIONS};
use crate::error::Error;
use crate::hash::ShardHasher;
use crate::shard::Shard;
use crate::stats::{Diagnostics, ShardDiagnostics, ShardOps, Stats};
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace, warn};

/// Lock-striped concurrent map.
///
/// Keys are routed to one of `N` partitions by `hash(key) % N`. Each partition
/// owns its own read-write lock and hash map, and no operation ever holds more
/// than one partition lock at a time. A container-wide atomic counter tracks
/// the number of entries without locking.
///
/// Whole-map operations ([`clear`](Self::clear), [`for_each`](Self::for_each),
/// [`filter`](Self::filter), [`iter`](Self::iter)) visit partitions one after
/// another in index order. They are not atomic across partitions: a concurrent
/// writer may change a partition that was already visited or not yet reached.
///
/// # Example
///
/// ```rust
/// use partmap::PartitionedMap;
///
/// let map = PartitionedMap::new(4)?;
/// assert!(map.insert("a", 1));
/// assert!(!map.insert("a", 2));
/// assert_eq!(map.find(&"a"), Some(1));
/// assert!(map.erase(&"a"));
/// assert_eq!(map.find(&"a"), None);
/// assert_eq!(map.count(), 0);
/// # Ok::<(), partmap::Error>(())
/// ```
pub struct PartitionedMap<K, V> {
    shards: Box<[Shard<K, V>]>,
    count: AtomicUsize,
    hash: ShardHasher,
}

impl<K, V> PartitionedMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    /// Create a map with `partitions` independently locked partitions.
    ///
    /// Returns [`Error::InvalidPartitionCount`] when `partitions` is 0.
    pub fn new(partitions: usize) -> Result<Self, Error> {
        Self::with_config(Config::new().partition_count(partitions)?)
    }

    /// Create a map with a custom config.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        if config.partition_count == 0 {
            return Err(Error::InvalidPartitionCount);
        }

        let partitions = config.partition_count;
        let mut shards = Vec::with_capacity(partitions);
        for partition in 0..partitions {
            let shard = match config.capacity_per_partition {
                Some(capacity) => Shard::with_capacity(capacity).map_err(|_| {
                    warn!(partition, capacity, "partition allocation failed");
                    Error::AllocationFailed {
                        partition,
                        capacity,
                    }
                })?,
                None => Shard::new(),
            };
            shards.push(shard);
        }

        debug!(
            partitions,
            hash = ?config.hash_function,
            capacity_per_partition = ?config.capacity_per_partition,
            "partitioned map created"
        );
        Ok(Self::from_shards(shards, create_hasher(config.hash_function)))
    }

    fn from_shards(shards: Vec<Shard<K, V>>, hash: ShardHasher) -> Self {
        Self {
            shards: shards.into_boxed_slice(),
            count: AtomicUsize::new(0),
            hash,
        }
    }

    /// Figure out which partition this key belongs to.
    #[inline]
    pub fn partition_of(&self, key: &K) -> usize {
        self.hash.partition_of(key, self.shards.len())
    }

    #[inline]
    fn shard_for(&self, key: &K) -> &Shard<K, V> {
        &self.shards[self.partition_of(key)]
    }

    /// Insert `value` under `key` if the key is absent.
    ///
    /// Returns `false` and leaves the stored value untouched when the key is
    /// already present. This is not an upsert.
    ///
    /// # Example
    ///
    /// ```rust
    /// use partmap::PartitionedMap;
    ///
    /// let map = PartitionedMap::new(4)?;
    /// assert!(map.insert("key", "value"));
    /// assert!(!map.insert("key", "other"));
    /// assert_eq!(map.find(&"key"), Some("value"));
    /// # Ok::<(), partmap::Error>(())
    /// ```
    pub fn insert(&self, key: K, value: V) -> bool {
        self.shard_for(&key)
            .insert_if_absent(key, value, &self.count)
    }

    /// Remove the entry for `key`. Returns `false` if there was none.
    pub fn erase(&self, key: &K) -> bool {
        self.shard_for(key).erase(key, &self.count)
    }

    /// Return a copy of the value stored under `key`.
    ///
    /// Takes only a read lock on the key's partition, so it never blocks
    /// writers to other partitions.
    pub fn find(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard_for(key).find(key)
    }

    /// Check if a key exists without copying the value.
    pub fn contains_key(&self, key: &K) -> bool {
        self.shard_for(key).contains_key(key)
    }

    /// Whether the entry counter is zero. Lock-free; may trail in-flight writes.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of entries according to the atomic counter. Lock-free.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Alias for [`count`](Self::count).
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Number of partitions, fixed at construction.
    pub fn partitions(&self) -> usize {
        self.shards.len()
    }

    /// Empty every partition, one at a time in index order.
    ///
    /// Each partition is cleared under its own write lock and the counter is
    /// reduced by what that partition held, so it never goes negative and
    /// reaches zero once all partitions are done (absent concurrent inserts).
    pub fn clear(&self) {
        let mut removed = 0;
        for (partition, shard) in self.shards.iter().enumerate() {
            let n = shard.clear(&self.count);
            trace!(partition, removed = n, "partition cleared");
            removed += n;
        }
        debug!(removed, "partitioned map cleared");
    }

    /// Call `visit` once for every value, one partition at a time.
    ///
    /// The partition's read lock is held while `visit` runs, so `visit` must
    /// not write to the same map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use partmap::PartitionedMap;
    ///
    /// let map = PartitionedMap::new(4)?;
    /// for i in 0..10 {
    ///     map.insert(i, i * 2);
    /// }
    ///
    /// let mut sum = 0;
    /// map.for_each(|v| sum += *v);
    /// assert_eq!(sum, 90);
    /// # Ok::<(), partmap::Error>(())
    /// ```
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&V),
    {
        for shard in self.shards.iter() {
            shard.for_each(&mut visit);
        }
    }

    /// Collect copies of every value matching `predicate`.
    ///
    /// Values keep their per-partition iteration order; there is no global
    /// order across partitions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use partmap::PartitionedMap;
    ///
    /// let map = PartitionedMap::new(4)?;
    /// for i in 0..10 {
    ///     map.insert(i, i);
    /// }
    ///
    /// let mut evens = map.filter(|v| v % 2 == 0);
    /// evens.sort();
    /// assert_eq!(evens, vec![0, 2, 4, 6, 8]);
    /// # Ok::<(), partmap::Error>(())
    /// ```
    pub fn filter<F>(&self, mut predicate: F) -> Vec<V>
    where
        F: FnMut(&V) -> bool,
        V: Clone,
    {
        let mut out = Vec::new();
        for shard in self.shards.iter() {
            shard.collect_matching(&mut predicate, &mut out);
        }
        out
    }

    /// Iterate over copies of all entries, buffering one partition at a time.
    ///
    /// Same consistency as [`for_each`](Self::for_each): each partition is
    /// read under its own lock, but no lock is held between `next` calls.
    pub fn iter(&self) -> crate::iter::Iter<'_, K, V>
    where
        K: Clone,
        V: Clone,
    {
        crate::iter::Iter::new(&self.shards)
    }

    /// Number of entries in each partition, read one partition at a time.
    pub fn partition_loads(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.len()).collect()
    }

    /// Get detailed statistics about the map and its partitions.
    pub fn stats(&self) -> Stats {
        let partition_sizes = self.partition_loads();
        let operations: Vec<ShardOps> = self.shards.iter().map(|s| s.stats()).collect();

        Stats {
            count: self.count(),
            partition_sizes,
            operations,
        }
    }

    /// Load-balance and operation diagnostics.
    pub fn diagnostics(&self) -> Diagnostics {
        let partitions = self
            .shards
            .iter()
            .map(|shard| ShardDiagnostics {
                entries: shard.len(),
                ops: shard.stats(),
            })
            .collect();
        Diagnostics::from_partitions(partitions)
    }
}

impl<K, V> Default for PartitionedMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    /// A map with 16 partitions routed by ahash.
    fn default() -> Self {
        let shards = (0..DEFAULT_PARTITIONS).map(|_| Shard::new()).collect();
        Self::from_shards(shards, ShardHasher::default())
    }
}

impl<K, V> std::fmt::Debug for PartitionedMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionedMap")
            .field("partitions", &self.shards.len())
            .field("count", &self.count.load(Ordering::Acquire))
            .field("hash", &self.hash)
            .finish()
    }
}
