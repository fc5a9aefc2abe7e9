//! Chunked, concurrent word counting.
//!
//! Lines flow `Source` -> [`chunker::ChunkAccumulator`] -> [`pool::WorkerPool`]
//! -> [`worker::Worker`], which counts into a chunk-local table, folds it
//! into the shared [`aggregate::AggregateTable`] and publishes the local
//! report. Once the pool drains, the aggregate is ranked and written as
//! `results.txt`.

pub mod aggregate;
pub mod chunker;
pub mod dispatch;
pub mod error;
pub mod pool;
pub mod report;
pub mod types;
pub mod worker;

pub use aggregate::AggregateTable;
pub use dispatch::{CountReport, Dispatcher, Source, SourceSummary, count_sources};
pub use error::CountError;
pub use report::ReportSink;
pub use types::{Chunk, CountOptions, FrequencyTable, RankedEntry, WorkItem};
