use crate::config::Config;
use crate::constants::RESULTS_FILE_NAME;
use crate::count::{CountReport, count_sources};
use crate::io::{input, output};
use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of one run, as shown to the user.
#[derive(Debug)]
pub struct RunSummary {
    pub sources: usize,
    pub chunks: usize,
    pub tokens: u64,
    pub distinct_words: usize,
    pub output_dir: PathBuf,
    pub results_path: PathBuf,
    /// Rendered read/write failures; empty on a clean run.
    pub failures: Vec<String>,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "OK {} files, {} chunks, {} words ({} distinct) -> {}",
            self.sources,
            self.chunks,
            self.tokens,
            self.distinct_words,
            self.results_path.display()
        )
    }
}

/// Pipeline for resolving inputs, counting them and writing reports.
#[derive(Default)]
pub struct Pipeline {
    /// Paths exactly as given, before glob expansion.
    literal_paths: Vec<PathBuf>,
    user_paths: Vec<PathBuf>,
    output_dir: PathBuf,
    source_files: Vec<PathBuf>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand user-provided paths (globs or literals).
    pub fn expand_paths(
        &mut self,
        paths: &[String],
    ) -> Result<()> {
        self.literal_paths = paths.iter().map(PathBuf::from).collect();
        self.user_paths = input::expand_paths(paths.to_vec())?;
        Ok(())
    }

    /// Pick the output directory: explicit, or derived from the first input.
    pub fn resolve_output_dir(
        &mut self,
        explicit: Option<&Path>,
    ) -> Result<()> {
        self.output_dir = match explicit {
            Some(dir) => dir.to_path_buf(),
            None => {
                let first = self
                    .user_paths
                    .first()
                    .ok_or_else(|| anyhow!("no input paths given"))?;
                output::default_output_dir(first)
            }
        };
        Ok(())
    }

    /// Build the ordered list of files to count.
    pub fn gather_sources(&mut self) -> Result<()> {
        self.source_files = input::gather_source_files(&self.user_paths, &self.output_dir)?;
        Ok(())
    }

    /// Clear and recreate the output directory, unless that would delete
    /// an input. Only literal arguments and gathered files are checked, so
    /// an `output` directory matched by a glob on a rerun does not count.
    pub fn prepare_output(&mut self) -> Result<()> {
        let inputs: Vec<PathBuf> = self
            .literal_paths
            .iter()
            .chain(&self.source_files)
            .cloned()
            .collect();
        self.output_dir = output::prepare_output_dir(&self.output_dir, &inputs)?;
        Ok(())
    }

    pub fn source_files(&self) -> &[PathBuf] {
        &self.source_files
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Count every source and write chunk reports plus `results.txt`.
    pub fn count(
        &self,
        config: &Config,
    ) -> Result<RunSummary> {
        let options = config.count_options()?;
        let sink = Arc::new(output::DirSink::new(&self.output_dir));
        let sources = self.source_files.iter().map(|p| input::open_source(p));
        let report = count_sources(sources, options, sink).context("word count failed")?;
        Ok(self.summarize(&report))
    }

    fn summarize(
        &self,
        report: &CountReport,
    ) -> RunSummary {
        let failures: Vec<String> = report.failures().map(|e| e.to_string()).collect();
        for f in &failures {
            error!("{f}");
        }
        let summary = RunSummary {
            sources: report.sources.len(),
            chunks: report.chunks.len(),
            tokens: report.total_tokens(),
            distinct_words: report.table.len(),
            output_dir: self.output_dir.clone(),
            results_path: self.output_dir.join(RESULTS_FILE_NAME),
            failures,
        };
        info!("{summary}");
        summary
    }
}

/// Runs every pipeline step for `config`.
pub fn run(config: &Config) -> Result<RunSummary> {
    let mut pipeline = Pipeline::new();
    pipeline.expand_paths(&config.paths)?;
    pipeline.resolve_output_dir(config.output_dir.as_deref())?;
    pipeline.gather_sources()?;
    pipeline.prepare_output()?;
    info!(
        files = pipeline.source_files().len(),
        output = %pipeline.output_dir().display(),
        "inputs resolved"
    );
    pipeline.count(config)
}
