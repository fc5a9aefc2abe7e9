#![allow(dead_code)]
use assert_fs::{TempDir, prelude::*};

pub const STORY: &str = "the Cat sat on the Mat. The cat sat!";

/// Builds a fixture tree:
/// root/
///   story.txt   (the cat scenario, one line)
///   lines.txt   (three short lines)
///   empty.txt   (zero bytes)
///   output/stale.chunk  (left over from an earlier run)
pub fn corpus() -> TempDir {
    let td = TempDir::new().unwrap();
    td.child("story.txt").write_str(STORY).unwrap();
    td.child("lines.txt")
        .write_str("Alpha beta\nbeta GAMMA\ngamma gamma\n")
        .unwrap();
    td.child("empty.txt").touch().unwrap();
    td.child("output").create_dir_all().unwrap();
    td.child("output/stale.chunk").write_str("old 1\n").unwrap();
    td
}

/// `n` numbered lines, each holding `word` once.
pub fn numbered_lines(
    n: usize,
    word: &str,
) -> String {
    (0..n).map(|i| format!("{word} {i}\n")).collect()
}

/// Parses `<word> <count>` report text.
pub fn parse_report(text: &str) -> Vec<(String, u64)> {
    text.lines()
        .map(|l| {
            let (w, n) = l.rsplit_once(' ').expect("word and count");
            (w.to_string(), n.parse().expect("numeric count"))
        })
        .collect()
}
