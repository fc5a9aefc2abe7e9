use std::io;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::aggregate::AggregateTable;
use super::chunker::ChunkAccumulator;
use super::error::CountError;
use super::pool::WorkerPool;
use super::report::{self, ReportSink};
use super::types::{Chunk, CountOptions, FrequencyTable, WorkItem};
use super::worker::{ChunkOutcome, Worker};
use crate::constants::RESULTS_FILE_NAME;

/// Input collaborator: a named stream of decoded lines.
pub struct Source<I> {
    pub name: String,
    pub lines: I,
}

impl<I> Source<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(
        name: impl Into<String>,
        lines: I,
    ) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }
}

/// Builds a source from lines already in memory.
pub fn source_from_text(
    name: impl Into<String>,
    text: &str,
) -> Source<std::vec::IntoIter<io::Result<String>>> {
    let lines: Vec<io::Result<String>> = text.lines().map(|l| Ok(l.to_owned())).collect();
    Source::new(name, lines.into_iter())
}

/// Per-source dispatch result.
#[derive(Debug)]
pub struct SourceSummary {
    pub name: String,
    pub lines: usize,
    pub chunks: usize,
    /// Read failure that cut this source short, if any.
    pub error: Option<CountError>,
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct CountReport {
    pub table: FrequencyTable,
    pub sources: Vec<SourceSummary>,
    pub chunks: Vec<ChunkOutcome>,
    /// Result of writing the aggregate report.
    pub results: Result<(), CountError>,
}

impl CountReport {
    pub fn total_tokens(&self) -> u64 {
        self.table.total()
    }

    /// Every read or write failure recorded during the run.
    pub fn failures(&self) -> impl Iterator<Item = &CountError> {
        self.sources
            .iter()
            .filter_map(|s| s.error.as_ref())
            .chain(self.chunks.iter().filter_map(|c| c.written.as_ref().err()))
            .chain(self.results.as_ref().err())
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Reads sources, seals their lines into chunks and feeds them to the pool.
pub struct Dispatcher {
    options: CountOptions,
    aggregate: Arc<AggregateTable>,
    pool: WorkerPool<WorkItem, ChunkOutcome>,
}

impl Dispatcher {
    pub fn new<S>(
        options: CountOptions,
        sink: Arc<S>,
    ) -> Result<Self, CountError>
    where
        S: ReportSink + ?Sized + 'static,
    {
        let worker = Worker::new(sink);
        let pool = WorkerPool::new(options.workers, move |item: WorkItem| worker.run(item))?;
        Ok(Self {
            options,
            aggregate: Arc::new(AggregateTable::new()),
            pool,
        })
    }

    /// Chunks one source in file order and submits each sealed chunk.
    ///
    /// A read error stops this source: chunks already submitted still run,
    /// the partially filled chunk is dropped, and the error is returned in
    /// the summary. Only a dead pool is an `Err`.
    pub fn dispatch<I>(
        &mut self,
        source: Source<I>,
    ) -> Result<SourceSummary, CountError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let Source { name, lines } = source;
        let mut acc = ChunkAccumulator::new(name.as_str(), self.options.chunk_size);
        let mut read = 0usize;
        let mut error = None;

        for line in lines {
            let line = match line {
                Ok(line) => line,
                Err(cause) => {
                    error = Some(CountError::Read {
                        source_name: name.clone(),
                        cause,
                    });
                    break;
                }
            };
            read += 1;
            if let Some(chunk) = acc.push(line.to_lowercase()) {
                debug!(artifact = %chunk.artifact, lines = chunk.len(), "dispatching chunk");
                self.submit(chunk)?;
            }
        }

        let chunks = if let Some(err) = &error {
            let chunks = acc.sealed();
            let dropped = acc.abandon();
            warn!("{err}; dropped {dropped} buffered lines");
            chunks
        } else {
            let sealed = acc.sealed();
            match acc.finish() {
                Some(chunk) => {
                    debug!(artifact = %chunk.artifact, lines = chunk.len(), "dispatching final chunk");
                    self.submit(chunk)?;
                    sealed + 1
                }
                None => sealed,
            }
        };

        info!(source = %name, lines = read, chunks, "source dispatched");
        Ok(SourceSummary {
            name,
            lines: read,
            chunks,
            error,
        })
    }

    fn submit(
        &mut self,
        chunk: Chunk,
    ) -> Result<(), CountError> {
        self.pool.submit(WorkItem {
            chunk,
            aggregate: Arc::clone(&self.aggregate),
        })
    }

    /// Waits for every submitted chunk and returns their outcomes together
    /// with the read-only aggregate.
    pub fn finish(self) -> Result<(Vec<ChunkOutcome>, FrequencyTable), CountError> {
        let Self {
            aggregate, pool, ..
        } = self;
        debug!(
            submitted = pool.submitted(),
            workers = pool.workers(),
            "waiting for worker pool"
        );
        let outcomes = pool.shutdown()?;
        // Every WorkItem (and its Arc clone) is gone once the pool drains.
        let table = match Arc::try_unwrap(aggregate) {
            Ok(table) => table.into_snapshot(),
            Err(shared) => shared.snapshot(),
        };
        Ok((outcomes, table))
    }
}

/// Runs the whole pipeline over `sources`: chunk, count concurrently,
/// drain, then write `results.txt` through `sink`.
pub fn count_sources<S, I, L>(
    sources: I,
    options: CountOptions,
    sink: Arc<S>,
) -> Result<CountReport, CountError>
where
    S: ReportSink + ?Sized + 'static,
    I: IntoIterator<Item = Source<L>>,
    L: Iterator<Item = io::Result<String>>,
{
    let mut dispatcher = Dispatcher::new(options, Arc::clone(&sink))?;
    let mut summaries = Vec::new();
    for source in sources {
        summaries.push(dispatcher.dispatch(source)?);
    }
    let (chunks, table) = dispatcher.finish()?;

    let results = report::publish(sink.as_ref(), RESULTS_FILE_NAME, &table);
    info!(
        chunks = chunks.len(),
        words = table.total(),
        distinct = table.len(),
        "count finished"
    );
    Ok(CountReport {
        table,
        sources: summaries,
        chunks,
        results,
    })
}
