use clap::Parser;

use crate::constants::{MAX_CHUNK_SIZE, MAX_WORKERS, MIN_CHUNK_SIZE, MIN_WORKERS};

#[derive(Parser, Debug)]
#[command(name = "wordfreq")]
#[command(
    about = "Count word frequencies across text files using a pool of worker threads, \
                   writing one report per chunk plus an aggregate results.txt."
)]
pub struct Cli {
    /// Files, directories or glob patterns to count.
    #[arg(required = true, num_args(1..))]
    pub paths: Vec<String>,

    /// Lines per chunk (10-5000).
    #[arg(
        short = 'c',
        long = "chunk-size",
        value_parser = clap::value_parser!(u32).range(MIN_CHUNK_SIZE as i64..=MAX_CHUNK_SIZE as i64)
    )]
    pub chunk_size: u32,

    /// Number of worker threads (1-100).
    #[arg(
        short = 'w',
        long = "workers",
        value_parser = clap::value_parser!(u32).range(MIN_WORKERS as i64..=MAX_WORKERS as i64)
    )]
    pub workers: u32,

    /// Where reports go. Defaults to an `output` directory next to the first input.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<std::path::PathBuf>,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
