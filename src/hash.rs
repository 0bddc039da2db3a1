use std::hash::{Hash, Hasher};

/// Hash function implementation for partition routing.
/// Uses an enum to avoid trait object limitations with generics.
///
/// Every variant is seeded with fixed keys, so a given key always routes to
/// the same partition for the lifetime of the process.
#[derive(Debug, Clone, Copy, Default)]
pub enum ShardHasher {
    /// AHash implementation (default, fast and well-distributed).
    #[default]
    AHash,
    /// FxHash implementation (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

impl ShardHasher {
    /// Hash a key with the configured function.
    pub fn hash_key<K: Hash + ?Sized>(&self, key: &K) -> u64 {
        match self {
            ShardHasher::AHash => {
                let mut hasher = ahash::AHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
            #[cfg(feature = "fxhash")]
            ShardHasher::FxHash => {
                let mut hasher = fxhash::FxHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
        }
    }

    /// Route a key to `hash(key) mod partitions`.
    #[inline]
    pub fn partition_of<K: Hash + ?Sized>(&self, key: &K, partitions: usize) -> usize {
        debug_assert!(partitions > 0);
        (self.hash_key(key) % partitions as u64) as usize
    }
}
