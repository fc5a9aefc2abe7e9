use std::sync::Arc;

use tracing::{debug, error};

use super::error::CountError;
use super::report::{self, ReportSink};
use super::types::{FrequencyTable, WorkItem};
use crate::tokenizer;

/// What a worker observed while processing one chunk.
#[derive(Debug)]
pub struct ChunkOutcome {
    pub artifact: String,
    pub lines: usize,
    pub tokens: u64,
    pub distinct: usize,
    /// Result of writing the chunk-local report. The aggregate has already
    /// been updated regardless of this.
    pub written: Result<(), CountError>,
}

/// Counts the tokens of a chunk locally, folds them into the shared
/// aggregate, then publishes the chunk-local report.
pub struct Worker<S: ?Sized> {
    sink: Arc<S>,
}

impl<S: ?Sized> Clone for Worker<S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S: ReportSink + ?Sized> Worker<S> {
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    pub fn run(
        &self,
        item: WorkItem,
    ) -> ChunkOutcome {
        let WorkItem { chunk, aggregate } = item;
        let local = count_lines(&chunk.lines);
        aggregate.merge(&local);

        let written = report::publish(self.sink.as_ref(), &chunk.artifact, &local);
        match &written {
            Ok(()) => debug!(
                artifact = %chunk.artifact,
                lines = chunk.lines.len(),
                words = local.len(),
                "chunk done"
            ),
            Err(e) => error!("{e}"),
        }

        ChunkOutcome {
            tokens: local.total(),
            distinct: local.len(),
            lines: chunk.lines.len(),
            artifact: chunk.artifact,
            written,
        }
    }
}

/// Tokenizes `lines` in order into a fresh table.
pub fn count_lines<L: AsRef<str>>(lines: &[L]) -> FrequencyTable {
    let mut local = FrequencyTable::new();
    for line in lines {
        for token in tokenizer::tokenize(line.as_ref()) {
            local.increment(token);
        }
    }
    local
}
