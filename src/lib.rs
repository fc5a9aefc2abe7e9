pub mod cli;
pub mod config;
pub mod constants;
pub mod count;
pub mod io;
pub mod pipeline;
pub mod tokenizer;

pub use count::report;
pub use pipeline::{Pipeline, RunSummary};
