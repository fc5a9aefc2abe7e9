// Line-bounded chunk builder for one source
use super::types::Chunk;
use crate::constants::CHUNK_EXTENSION;

/// Name of the per-chunk report: `<source>_<index>.chunk`.
pub fn artifact_name(
    source: &str,
    index: usize,
) -> String {
    format!("{source}_{index}.{CHUNK_EXTENSION}")
}

/// Buffers lines of one source and seals them into [`Chunk`]s of at most
/// `capacity` lines. Chunk indices start at 0 and increase by one per
/// sealed chunk.
#[derive(Debug)]
pub struct ChunkAccumulator {
    source: String,
    capacity: usize,
    next_index: usize,
    lines: Vec<String>,
}

impl ChunkAccumulator {
    pub fn new(
        source: impl Into<String>,
        capacity: usize,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            source: source.into(),
            capacity,
            next_index: 0,
            lines: Vec::with_capacity(capacity),
        }
    }

    /// Adds a line and returns the sealed chunk once the buffer is full.
    /// The accumulator is immediately ready for the next chunk.
    pub fn push(
        &mut self,
        line: String,
    ) -> Option<Chunk> {
        self.lines.push(line);
        if self.lines.len() >= self.capacity {
            Some(self.seal())
        } else {
            None
        }
    }

    /// Seals whatever is buffered at end of input. An empty buffer yields
    /// nothing.
    pub fn finish(mut self) -> Option<Chunk> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.seal())
        }
    }

    /// Drops any buffered lines without sealing them.
    pub fn abandon(self) -> usize {
        self.lines.len()
    }

    /// Number of chunks sealed so far.
    pub fn sealed(&self) -> usize {
        self.next_index
    }

    pub fn buffered(&self) -> usize {
        self.lines.len()
    }

    fn seal(&mut self) -> Chunk {
        let index = self.next_index;
        self.next_index += 1;
        let lines = std::mem::replace(&mut self.lines, Vec::with_capacity(self.capacity));
        Chunk {
            artifact: artifact_name(&self.source, index),
            source: self.source.clone(),
            index,
            lines,
        }
    }
}

/// Splits `lines` into chunks in one go. Convenience for callers that
/// already hold the whole input.
pub fn split_lines<I>(
    source: &str,
    lines: I,
    capacity: usize,
) -> Vec<Chunk>
where
    I: IntoIterator<Item = String>,
{
    let mut acc = ChunkAccumulator::new(source, capacity);
    let mut chunks: Vec<Chunk> = lines.into_iter().filter_map(|l| acc.push(l)).collect();
    chunks.extend(acc.finish());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn seals_full_chunks_and_trailing_partial() {
        let chunks = split_lines("a.txt", lines(25), 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(
            chunks.iter().map(Chunk::len).collect::<Vec<_>>(),
            vec![10, 10, 5]
        );
        assert_eq!(chunks[0].artifact, "a.txt_0.chunk");
        assert_eq!(chunks[2].artifact, "a.txt_2.chunk");
        assert_eq!(chunks[2].lines[0], "line 20");
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let chunks = split_lines("b", lines(20), 10);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 10));
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(split_lines("empty", Vec::new(), 10).is_empty());
    }

    #[test]
    fn chunk_size_one_gives_one_chunk_per_line() {
        let chunks = split_lines("three", lines(3), 1);
        assert_eq!(chunks.len(), 3);
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.index, i);
            assert_eq!(c.lines, vec![format!("line {i}")]);
        }
    }

    #[test]
    fn abandon_reports_dropped_lines() {
        let mut acc = ChunkAccumulator::new("x", 10);
        for l in lines(4) {
            assert!(acc.push(l).is_none());
        }
        assert_eq!(acc.buffered(), 4);
        assert_eq!(acc.sealed(), 0);
        assert_eq!(acc.abandon(), 4);
    }
}
