use crate::error::Error;
use crate::hash::ShardHasher;

/// Partition count used by [`Config::default`].
pub const DEFAULT_PARTITIONS: usize = 16;

/// Which hash function to use for partition routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// Use ahash (default, fast and well-distributed).
    #[default]
    AHash,
    /// Use fxhash (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

/// Configuration for a PartitionedMap instance.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) partition_count: usize,
    pub(crate) hash_function: HashFunction,
    pub(crate) capacity_per_partition: Option<usize>,
}

impl Config {
    /// Create a new config with defaults (16 partitions, ahash).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of partitions. Must be greater than 0.
    pub fn partition_count(mut self, count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::InvalidPartitionCount);
        }
        self.partition_count = count;
        Ok(self)
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.hash_function = hash_fn;
        self
    }

    /// Reserve room for `capacity` entries in every partition up front.
    /// Omitted by default (partitions start empty and grow on demand).
    pub fn capacity_per_partition(mut self, capacity: usize) -> Self {
        self.capacity_per_partition = Some(capacity);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            partition_count: DEFAULT_PARTITIONS,
            hash_function: HashFunction::AHash,
            capacity_per_partition: None,
        }
    }
}

/// Builder for creating a PartitionedMap with custom configuration.
#[derive(Debug, Default)]
pub struct PartitionedMapBuilder {
    config: Config,
}

impl PartitionedMapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the number of partitions. Must be greater than 0.
    pub fn partition_count(mut self, count: usize) -> Result<Self, Error> {
        self.config = self.config.partition_count(count)?;
        Ok(self)
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.config = self.config.hash_function(hash_fn);
        self
    }

    /// Reserve room for `capacity` entries in every partition.
    pub fn capacity_per_partition(mut self, capacity: usize) -> Self {
        self.config = self.config.capacity_per_partition(capacity);
        self
    }

    /// Build a PartitionedMap with the configured settings.
    pub fn build<K, V>(self) -> Result<crate::PartitionedMap<K, V>, Error>
    where
        K: std::hash::Hash + Eq + Send + Sync,
        V: Send + Sync,
    {
        crate::PartitionedMap::with_config(self.config)
    }
}

pub(crate) fn create_hasher(hash_fn: HashFunction) -> ShardHasher {
    match hash_fn {
        HashFunction::AHash => ShardHasher::AHash,
        #[cfg(feature = "fxhash")]
        HashFunction::FxHash => ShardHasher::FxHash,
    }
}
