use crate::shard::Shard;
use std::hash::Hash;

/// Weakly consistent iterator over copies of a map's entries.
///
/// Entries are copied out of one partition at a time under that partition's
/// read lock, then yielded from a buffer with no lock held. Changes made to a
/// partition after it has been buffered are not observed; changes made to a
/// partition not yet reached are.
pub struct Iter<'a, K, V> {
    shards: &'a [Shard<K, V>],
    current_shard: usize,
    buffer: std::vec::IntoIter<(K, V)>,
}

impl<'a, K, V> Iter<'a, K, V>
where
    K: Hash + Eq + Send + Sync + Clone,
    V: Send + Sync + Clone,
{
    pub(crate) fn new(shards: &'a [Shard<K, V>]) -> Self {
        Self {
            shards,
            current_shard: 0,
            buffer: Vec::new().into_iter(),
        }
    }

    /// Refill the buffer from the next non-empty partition.
    fn fill_buffer(&mut self) -> bool {
        let mut entries = Vec::new();
        while self.current_shard < self.shards.len() {
            self.shards[self.current_shard].copy_entries(&mut entries);
            self.current_shard += 1;
            if !entries.is_empty() {
                self.buffer = entries.into_iter();
                return true;
            }
        }
        false
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Hash + Eq + Send + Sync + Clone,
    V: Send + Sync + Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.buffer.next() {
            return Some(item);
        }
        if !self.fill_buffer() {
            return None;
        }
        self.buffer.next()
    }
}
