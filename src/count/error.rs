use thiserror::Error;

/// Failures surfaced by the counting core.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("failed to read source {source_name}: {cause}")]
    Read {
        source_name: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("failed to write report {artifact}: {cause}")]
    Write {
        artifact: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("worker thread panicked")]
    WorkerPanicked,

    #[error("worker pool has no live workers")]
    PoolDisconnected,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{0} must be at least 1")]
    InvalidOption(&'static str),
}
