//! Statistics and diagnostics types.

#[cfg(feature = "metrics")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-partition operation statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardOps {
    /// Lookups that found their key.
    pub finds: u64,
    /// Inserts that added a new entry.
    pub inserts: u64,
    /// Erases that removed an entry.
    pub erases: u64,
    /// Number of times this partition was cleared.
    pub clears: u64,
    /// Number of lock acquisitions (0 when metrics feature disabled).
    pub lock_acquisitions: u64,
    /// Cumulative lock wait time in nanoseconds (0 when lock-timing disabled).
    pub lock_wait_nanos: u64,
}

impl ShardOps {
    /// Sum of finds, inserts, erases and clears.
    pub fn total(&self) -> u64 {
        self.finds + self.inserts + self.erases + self.clears
    }
}

#[cfg(feature = "metrics")]
pub(crate) struct ShardStats {
    finds: AtomicU64,
    inserts: AtomicU64,
    erases: AtomicU64,
    clears: AtomicU64,
    lock_acquisitions: AtomicU64,
    #[cfg(feature = "lock-timing")]
    lock_wait_nanos: AtomicU64,
}

#[cfg(feature = "metrics")]
impl ShardStats {
    pub fn new() -> Self {
        Self {
            finds: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            erases: AtomicU64::new(0),
            clears: AtomicU64::new(0),
            lock_acquisitions: AtomicU64::new(0),
            #[cfg(feature = "lock-timing")]
            lock_wait_nanos: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_find(&self) {
        self.finds.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_erase(&self) {
        self.erases.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lock_acquisition(&self) {
        self.lock_acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    #[cfg(feature = "lock-timing")]
    #[inline]
    pub fn record_lock_wait(&self, nanos: u64) {
        self.lock_wait_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ShardOps {
        ShardOps {
            finds: self.finds.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            erases: self.erases.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            lock_acquisitions: self.lock_acquisitions.load(Ordering::Relaxed),
            #[cfg(feature = "lock-timing")]
            lock_wait_nanos: self.lock_wait_nanos.load(Ordering::Relaxed),
            #[cfg(not(feature = "lock-timing"))]
            lock_wait_nanos: 0,
        }
    }
}

/// Zero-sized placeholder when metrics are disabled.
#[cfg(not(feature = "metrics"))]
pub(crate) struct ShardStats;

#[cfg(not(feature = "metrics"))]
impl ShardStats {
    pub fn new() -> Self {
        ShardStats
    }

    #[inline]
    pub fn record_find(&self) {}

    #[inline]
    pub fn record_insert(&self) {}

    #[inline]
    pub fn record_erase(&self) {}

    #[inline]
    pub fn record_clear(&self) {}

    #[inline]
    pub fn record_lock_acquisition(&self) {}

    pub fn snapshot(&self) -> ShardOps {
        ShardOps::default()
    }
}

/// Aggregate statistics for a PartitionedMap instance.
///
/// Partition sizes are read one partition at a time, so under concurrent
/// mutation `partition_sizes` may not sum to `count`.
#[derive(Debug, Clone)]
pub struct Stats {
    /// Value of the entry counter when the stats were taken.
    pub count: usize,
    /// Number of entries in each partition.
    pub partition_sizes: Vec<usize>,
    /// Operation counts for each partition.
    pub operations: Vec<ShardOps>,
}

/// Per-partition diagnostics snapshot.
#[derive(Debug, Clone)]
pub struct ShardDiagnostics {
    /// Number of entries in this partition.
    pub entries: usize,
    /// Operation counters (zeroed when metrics disabled).
    pub ops: ShardOps,
}

/// Structured snapshot for load-balance introspection.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    /// Total number of entries across all partitions.
    pub total_entries: usize,
    /// Per-partition diagnostics.
    pub partitions: Vec<ShardDiagnostics>,
    /// Total find + insert + erase + clear operations (0 when metrics disabled).
    pub total_operations: u64,
    /// Average load (entries) per partition.
    pub avg_load_per_partition: f64,
    /// Max load / avg load ratio. 0.0 for an empty map.
    pub max_load_ratio: f64,
}

impl Diagnostics {
    pub(crate) fn from_partitions(partitions: Vec<ShardDiagnostics>) -> Self {
        let total_entries: usize = partitions.iter().map(|p| p.entries).sum();
        let total_operations = partitions.iter().map(|p| p.ops.total()).sum();
        let avg = if partitions.is_empty() {
            0.0
        } else {
            total_entries as f64 / partitions.len() as f64
        };
        let max = partitions.iter().map(|p| p.entries).max().unwrap_or(0);
        let max_load_ratio = if avg > 0.0 { max as f64 / avg } else { 0.0 };

        Self {
            total_entries,
            partitions,
            total_operations,
            avg_load_per_partition: avg,
            max_load_ratio,
        }
    }
}
