/// Errors that can occur when building or operating on a PartitionedMap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The partition count is invalid (must be greater than 0).
    #[error("partition count must be greater than 0")]
    InvalidPartitionCount,
    /// Reserving storage for a partition failed.
    #[error("failed to reserve capacity for {capacity} entries in partition {partition}")]
    AllocationFailed {
        /// Index of the partition whose reservation failed.
        partition: usize,
        /// Requested number of entries.
        capacity: usize,
    },
    /// The OS refused to start a task thread.
    #[error("failed to spawn task thread: {0}")]
    SpawnFailed(String),
    /// A submitted task panicked before producing its result.
    #[error("task panicked: {0}")]
    TaskPanicked(String),
}
