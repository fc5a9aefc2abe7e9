use std::{
    collections::BTreeMap,
    fs,
    io::BufWriter,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result, bail};

use crate::constants::OUTPUT_DIR_NAME;
use crate::count::{CountError, RankedEntry, ReportSink, report};

/// `<dir>/output` for a directory input, `<parent>/output` for a file.
pub fn default_output_dir(input: &Path) -> PathBuf {
    if input.is_dir() {
        input.join(OUTPUT_DIR_NAME)
    } else {
        input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .join(OUTPUT_DIR_NAME)
    }
}

/// Fails if clearing `dir` would delete any of `inputs`, i.e. if `dir` is
/// one of them or an ancestor of one. Inputs that do not exist (such as
/// unexpanded glob patterns) are ignored.
pub fn ensure_disjoint(
    dir: &Path,
    inputs: &[PathBuf],
) -> Result<()> {
    // Nothing is deleted if the directory does not exist yet
    let Ok(out) = dunce::canonicalize(dir) else {
        return Ok(());
    };
    for input in inputs {
        let Ok(canon) = dunce::canonicalize(input) else {
            continue;
        };
        if canon.starts_with(&out) {
            bail!(
                "Output directory {} would overwrite input {}",
                dir.display(),
                input.display()
            );
        }
    }
    Ok(())
}

/// Deletes `dir` if present and recreates it empty, refusing to touch any
/// of `inputs`.
pub fn prepare_output_dir(
    dir: &Path,
    inputs: &[PathBuf],
) -> Result<PathBuf> {
    ensure_disjoint(dir, inputs)?;
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Cannot clear output directory {}", dir.display()))?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory {}", dir.display()))?;
    Ok(dunce::canonicalize(dir)?)
}

/// Writes each report as a file inside one directory.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_of(
        &self,
        name: &str,
    ) -> PathBuf {
        self.dir.join(name)
    }
}

impl ReportSink for DirSink {
    fn write_report(
        &self,
        name: &str,
        entries: &[RankedEntry],
    ) -> Result<(), CountError> {
        let write = || -> std::io::Result<()> {
            let file = fs::File::create(self.path_of(name))?;
            report::write_ranked(BufWriter::new(file), entries)
        };
        write().map_err(|cause| CountError::Write {
            artifact: name.to_owned(),
            cause,
        })
    }
}

/// Keeps rendered reports in memory, keyed by name.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<BTreeMap<String, String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<String> {
        self.lock().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.reports.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ReportSink for MemorySink {
    fn write_report(
        &self,
        name: &str,
        entries: &[RankedEntry],
    ) -> Result<(), CountError> {
        self.lock()
            .insert(name.to_owned(), report::render(entries));
        Ok(())
    }
}
