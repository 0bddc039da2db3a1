//! # partmap
//!
//! A lock-striped concurrent map.
//!
//! `PartitionedMap` splits its key space across a fixed number of partitions,
//! each with its own read-write lock and hash map. Operations on different
//! partitions don't block each other, and no operation ever holds two
//! partition locks at once, so the map cannot deadlock on itself.
//!
//! ## Features
//!
//! - **Insert-if-absent**: `insert` never overwrites an existing value
//! - **Copy-out reads**: `find`, `filter` and `iter` hand back clones, never references into a partition
//! - **Lock-free count**: an atomic counter answers `count` and `is_empty` without locking
//! - **Deterministic routing**: a key always lands in `hash(key) % partitions`
//! - **Weakly consistent scans**: `clear`, `for_each` and `filter` lock one partition at a time
//! - **Statistics**: per-partition load and (with `metrics`) operation counters
//!
//! ## Example
//!
//! ```rust
//! use partmap::PartitionedMap;
//!
//! let map = PartitionedMap::new(4)?;
//!
//! assert!(map.insert("a", 1));
//! assert!(!map.insert("a", 2)); // existing value kept
//! assert_eq!(map.find(&"a"), Some(1));
//!
//! let big = map.filter(|v| *v > 0);
//! assert_eq!(big, vec![1]);
//!
//! assert!(map.erase(&"a"));
//! assert!(map.is_empty());
//! # Ok::<(), partmap::Error>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use partmap::{HashFunction, PartitionedMapBuilder};
//!
//! let map = PartitionedMapBuilder::new()
//!     .partition_count(12)?
//!     .hash_function(HashFunction::AHash)
//!     .capacity_per_partition(64)
//!     .build::<String, i32>()?;
//! assert_eq!(map.partitions(), 12);
//! # Ok::<(), partmap::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Configuration and builder types.
pub mod config;
/// Error types.
pub mod error;
/// Hash function implementations.
pub mod hash;
/// Iterator implementations.
pub mod iter;
/// Main PartitionedMap implementation.
pub mod partitioned;
/// Internal partition implementation.
mod shard;
/// Statistics and metrics collection.
pub mod stats;
/// Elapsed-time measurement.
pub mod stopwatch;
/// Background task runner.
pub mod task;

// Re-export main types
pub use config::{Config, HashFunction, PartitionedMapBuilder};
pub use error::Error;
pub use partitioned::PartitionedMap;
pub use stats::{Diagnostics, ShardDiagnostics, ShardOps, Stats};
pub use stopwatch::Stopwatch;
pub use task::TaskHandle;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let map = PartitionedMap::new(4).unwrap();

        assert!(map.insert("key1", "value1"));
        assert!(!map.insert("key1", "value2"));

        assert_eq!(map.find(&"key1"), Some("value1"));
        assert!(map.find(&"nonexistent").is_none());

        assert!(map.erase(&"key1"));
        assert!(map.find(&"key1").is_none());
        assert!(!map.erase(&"key1"));
    }

    #[test]
    fn test_zero_partitions_rejected() {
        assert_eq!(
            PartitionedMap::<u32, u32>::new(0).unwrap_err(),
            Error::InvalidPartitionCount
        );
    }

    #[test]
    fn test_default_has_sixteen_partitions() {
        let map: PartitionedMap<u32, u32> = PartitionedMap::default();
        assert_eq!(map.partitions(), 16);
        assert!(map.is_empty());
    }

    #[test]
    fn test_stats() {
        let map = PartitionedMap::new(8).unwrap();
        map.insert("key1", "value1");
        map.insert("key2", "value2");

        let stats = map.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.partition_sizes.iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_builder() {
        let map = PartitionedMapBuilder::new()
            .partition_count(3)
            .unwrap()
            .build::<String, i32>()
            .unwrap();

        map.insert("test".to_string(), 42);
        assert_eq!(map.find(&"test".to_string()), Some(42));
        assert_eq!(map.partitions(), 3);
    }

    #[test]
    fn test_partition_of_matches_storage() {
        let map = PartitionedMap::new(5).unwrap();
        let key = "routed".to_string();
        let partition = map.partition_of(&key);
        map.insert(key, 1);

        let loads = map.partition_loads();
        assert_eq!(loads[partition], 1);
        assert_eq!(loads.iter().sum::<usize>(), 1);
    }
}
