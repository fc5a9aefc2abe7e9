use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use wordfreq::{config::Config, pipeline};

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let config = Config::from_cli()?;
    init_tracing(config.log_level());

    let summary = pipeline::run(&config)?;
    eprintln!("{summary}");

    if summary.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{} error(s) during the run", summary.failures.len());
        Ok(ExitCode::FAILURE)
    }
}
