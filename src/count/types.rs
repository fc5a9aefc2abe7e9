use std::collections::HashMap;
use std::collections::hash_map;
use std::sync::Arc;

use super::aggregate::AggregateTable;
use super::error::CountError;

/// Word -> occurrence count. Entries are only created by an increment, so
/// every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(
        &mut self,
        word: &str,
    ) {
        self.add(word, 1);
    }

    /// Adds `n` occurrences of `word`. Adding zero never creates an entry.
    pub fn add(
        &mut self,
        word: &str,
        n: u64,
    ) {
        if n == 0 {
            return;
        }
        match self.counts.get_mut(word) {
            Some(count) => *count += n,
            None => {
                self.counts.insert(word.to_owned(), n);
            }
        }
    }

    /// Sums `other` into this table.
    pub fn merge(
        &mut self,
        other: &FrequencyTable,
    ) {
        for (word, n) in other.iter() {
            self.add(word, n);
        }
    }

    pub fn get(
        &self,
        word: &str,
    ) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, n)| (w.as_str(), *n))
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl FromIterator<(String, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (word, n) in iter {
            table.add(&word, n);
        }
        table
    }
}

/// A sealed group of lowercased lines plus the name of its report artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub source: String,
    pub index: usize,
    pub artifact: String,
    pub lines: Vec<String>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Unit of work handed to the pool.
#[derive(Debug)]
pub struct WorkItem {
    pub chunk: Chunk,
    pub aggregate: Arc<AggregateTable>,
}

/// One `<word> <count>` line of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub word: String,
    pub count: u64,
}

/// Knobs consumed by the core. Range limits are enforced upstream by
/// [`crate::config::Config`]; the core only needs both values to be nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOptions {
    pub chunk_size: usize,
    pub workers: usize,
}

impl CountOptions {
    pub fn new(
        chunk_size: usize,
        workers: usize,
    ) -> Result<Self, CountError> {
        if chunk_size == 0 {
            return Err(CountError::InvalidOption("chunk size"));
        }
        if workers == 0 {
            return Err(CountError::InvalidOption("worker count"));
        }
        Ok(Self {
            chunk_size,
            workers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sums_counts() {
        let mut a = FrequencyTable::new();
        a.increment("the");
        a.increment("cat");
        let mut b = FrequencyTable::new();
        b.increment("the");
        b.add("mat", 3);
        a.merge(&b);
        assert_eq!(a.get("the"), 2);
        assert_eq!(a.get("cat"), 1);
        assert_eq!(a.get("mat"), 3);
        assert_eq!(a.total(), 6);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn adding_zero_creates_no_entry() {
        let mut t = FrequencyTable::new();
        t.add("ghost", 0);
        assert!(t.is_empty());
        assert_eq!(t.get("ghost"), 0);
    }

    #[test]
    fn options_reject_zero() {
        assert!(CountOptions::new(0, 1).is_err());
        assert!(CountOptions::new(1, 0).is_err());
        assert!(CountOptions::new(1, 1).is_ok());
    }
}
