// Centralized limits & artifact names
pub const MIN_CHUNK_SIZE: usize = 10;
pub const MAX_CHUNK_SIZE: usize = 5000;
pub const MIN_WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 100;

pub const OUTPUT_DIR_NAME: &str = "output";
pub const RESULTS_FILE_NAME: &str = "results.txt";
pub const CHUNK_EXTENSION: &str = "chunk";
