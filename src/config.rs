use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::cli::Cli;
use crate::constants::{MAX_CHUNK_SIZE, MAX_WORKERS, MIN_CHUNK_SIZE, MIN_WORKERS};
use crate::count::CountOptions;

/// Application configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: Vec<String>,
    pub chunk_size: usize,
    pub workers: usize,
    /// `None` means derive it from the first input path.
    pub output_dir: Option<PathBuf>,
    pub verbose: u8,
}

impl Config {
    /// Parse CLI arguments into a Config
    pub fn from_cli() -> Result<Self> {
        Self::try_from(Cli::parse())
    }

    /// Checks the ranges the CLI parser enforces, for configs built in code.
    pub fn validate(&self) -> Result<()> {
        if self.paths.is_empty() {
            bail!("at least one input path is required");
        }
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            bail!(
                "chunk size {} outside {MIN_CHUNK_SIZE}-{MAX_CHUNK_SIZE}",
                self.chunk_size
            );
        }
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&self.workers) {
            bail!(
                "worker count {} outside {MIN_WORKERS}-{MAX_WORKERS}",
                self.workers
            );
        }
        Ok(())
    }

    pub fn count_options(&self) -> Result<CountOptions> {
        Ok(CountOptions::new(self.chunk_size, self.workers)?)
    }

    /// Default tracing directive when RUST_LOG is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let config = Config {
            paths: cli.paths,
            chunk_size: cli.chunk_size as usize,
            workers: cli.workers as usize,
            output_dir: cli.output_dir,
            verbose: cli.verbose,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(
        chunk_size: usize,
        workers: usize,
    ) -> Config {
        Config {
            paths: vec![".".into()],
            chunk_size,
            workers,
            output_dir: None,
            verbose: 0,
        }
    }

    #[test]
    fn accepts_range_bounds() {
        assert!(config(10, 1).validate().is_ok());
        assert!(config(5000, 100).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(config(9, 1).validate().is_err());
        assert!(config(5001, 1).validate().is_err());
        assert!(config(10, 0).validate().is_err());
        assert!(config(10, 101).validate().is_err());
    }

    #[test]
    fn parses_cli_flags() {
        let cli = Cli::try_parse_from(["wordfreq", "-c", "50", "-w", "4", "-vv", "in.txt"]).unwrap();
        let cfg = Config::try_from(cli).unwrap();
        assert_eq!(cfg.chunk_size, 50);
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.paths, vec!["in.txt".to_string()]);
    }

    #[test]
    fn cli_rejects_small_chunk_size() {
        assert!(Cli::try_parse_from(["wordfreq", "-c", "5", "-w", "4", "in.txt"]).is_err());
        assert!(Cli::try_parse_from(["wordfreq", "-c", "10", "-w", "0", "in.txt"]).is_err());
    }
}
