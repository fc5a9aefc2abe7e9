use std::{
    fs,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use glob::glob;
use ignore::WalkBuilder;

use crate::constants::OUTPUT_DIR_NAME;
use crate::count::Source;

pub type LineIter = Box<dyn Iterator<Item = io::Result<String>> + Send>;

pub fn expand_paths(paths: Vec<String>) -> Result<Vec<PathBuf>> {
    let mut expanded = Vec::new();

    for p in paths {
        // Normalize Windows path separators for glob patterns
        let pattern = p.replace('\\', "/");
        let pattern_results =
            glob(&pattern).map_err(|e| anyhow!("Invalid glob pattern {}: {:?}", pattern, e))?;

        let mut has_match = false;
        for path_res in pattern_results {
            has_match = true;
            expanded.push(path_res?);
        }
        // No matches: keep it as a literal path so a missing file is reported
        if !has_match {
            expanded.push(PathBuf::from(&p));
        }
    }

    Ok(expanded)
}

/// Resolves user paths to the list of files to count.
///
/// Directories are listed one level deep, hidden files included. A
/// directory named `output`, or `output_dir` itself, is skipped whether it
/// was given directly (e.g. via a glob) or found inside a listed directory.
/// Nested directories are skipped too.
pub fn gather_source_files(
    paths: &[PathBuf],
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let output_canon = dunce::canonicalize(output_dir).ok();
    let mut results = Vec::new();

    for path in paths {
        if path.is_dir() && is_output_dir(path, output_canon.as_deref()) {
            tracing::debug!("Skipping {:?}: output directory", path);
            continue;
        }
        if path.is_file() {
            results.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(anyhow!("No such file/directory: {}", path.display()));
        }

        let walker = WalkBuilder::new(path)
            .max_depth(Some(1))
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut files = Vec::new();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Could not process entry in {:?}: {:?}", path, e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let entry_path = entry.path();
            if is_output_dir(entry_path, output_canon.as_deref()) {
                continue;
            }
            if entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                files.push(entry_path.to_path_buf());
            } else {
                tracing::warn!("Skipping {:?}: not a regular file", entry_path);
            }
        }
        files.sort();
        results.extend(files);
    }

    results.dedup();
    Ok(results)
}

fn is_output_dir(
    path: &Path,
    output_canon: Option<&Path>,
) -> bool {
    path.file_name().is_some_and(|n| n == OUTPUT_DIR_NAME) || is_same_path(path, output_canon)
}

fn is_same_path(
    path: &Path,
    canon: Option<&Path>,
) -> bool {
    match canon {
        Some(canon) => dunce::canonicalize(path).is_ok_and(|p| p == canon),
        None => false,
    }
}

/// Line iterator that decodes UTF-8 lossily. Lines end at `\n`; a
/// preceding `\r` is stripped.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Base name used for chunk artifacts of `path`.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Opens `path` as a line source. An open failure becomes the first (and
/// only) item of the stream so it is reported like any other read error.
pub fn open_source(path: &Path) -> Source<LineIter> {
    let lines: LineIter = match fs::File::open(path) {
        Ok(file) => Box::new(LossyLines::new(BufReader::new(file))),
        Err(e) => Box::new(std::iter::once(Err(e))),
    };
    Source::new(source_name(path), lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn lossy_lines_handle_crlf_and_bad_utf8() -> anyhow::Result<()> {
        let data: &[u8] = b"one\r\ntwo\n\xffthree\nlast";
        let lines: Vec<String> = LossyLines::new(Cursor::new(data)).collect::<io::Result<_>>()?;
        assert_eq!(lines, vec!["one", "two", "\u{fffd}three", "last"]);
        Ok(())
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert_eq!(LossyLines::new(Cursor::new(Vec::new())).count(), 0);
    }

    #[test]
    fn missing_file_yields_single_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = open_source(&dir.path().join("nope.txt"));
        assert_eq!(src.name, "nope.txt");
        let items: Vec<_> = src.lines.collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn directory_listing_skips_output_and_subdirs() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("b.txt"), "b")?;
        fs::write(dir.path().join("a.txt"), "a")?;
        fs::write(dir.path().join(".hidden"), "h")?;
        fs::create_dir(dir.path().join(OUTPUT_DIR_NAME))?;
        fs::create_dir(dir.path().join("nested"))?;
        fs::write(dir.path().join("nested").join("c.txt"), "c")?;

        let files = gather_source_files(
            &[dir.path().to_path_buf()],
            &dir.path().join(OUTPUT_DIR_NAME),
        )?;
        let names: Vec<String> = files.iter().map(|p| source_name(p)).collect();
        assert_eq!(names, vec![".hidden", "a.txt", "b.txt"]);
        Ok(())
    }

    #[test]
    fn output_dir_given_directly_is_skipped() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.txt"), "a")?;
        let out = dir.path().join(OUTPUT_DIR_NAME);
        fs::create_dir(&out)?;
        fs::write(out.join("results.txt"), "a 1\n")?;
        let custom = dir.path().join("reports");
        fs::create_dir(&custom)?;
        fs::write(custom.join("a.txt_0.chunk"), "a 1\n")?;

        let pattern = format!("{}/*", dir.path().display());
        let paths = expand_paths(vec![pattern])?;
        let files = gather_source_files(&paths, &out)?;
        let names: Vec<String> = files.iter().map(|p| source_name(p)).collect();
        assert_eq!(names, vec!["a.txt", "a.txt_0.chunk"]);

        let files = gather_source_files(&paths, &custom)?;
        let names: Vec<String> = files.iter().map(|p| source_name(p)).collect();
        assert_eq!(names, vec!["a.txt"]);
        Ok(())
    }
}
