use dashmap::DashMap;

use super::types::FrequencyTable;

/// Run-wide frequency table shared by every worker.
///
/// Backed by a sharded concurrent map: each increment takes the shard lock
/// for its key, so concurrent updates to the same word are serialized and
/// none are lost.
#[derive(Debug, Default)]
pub struct AggregateTable {
    counts: DashMap<String, u64>,
}

impl AggregateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(
        &self,
        word: &str,
    ) {
        self.add(word, 1);
    }

    fn add(
        &self,
        word: &str,
        n: u64,
    ) {
        if n == 0 {
            return;
        }
        // get_mut first so the common case does not allocate a key
        if let Some(mut count) = self.counts.get_mut(word) {
            *count += n;
            return;
        }
        *self.counts.entry(word.to_owned()).or_insert(0) += n;
    }

    /// Folds a finished chunk-local table into the aggregate.
    pub fn merge(
        &self,
        local: &FrequencyTable,
    ) {
        for (word, n) in local.iter() {
            self.add(word, n);
        }
    }

    pub fn get(
        &self,
        word: &str,
    ) -> u64 {
        self.counts.get(word).map(|c| *c).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Consumes the table once every writer is gone.
    pub fn into_snapshot(self) -> FrequencyTable {
        self.counts.into_iter().collect()
    }

    /// Copies the current contents without consuming the table.
    pub fn snapshot(&self) -> FrequencyTable {
        self.counts
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect()
    }
}
