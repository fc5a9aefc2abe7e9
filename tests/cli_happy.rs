mod common;
use assert_fs::prelude::*;
use common::{corpus, parse_report};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn directory_run_writes_chunks_and_results() {
    let dir = corpus();

    assert_cmd::cargo::cargo_bin_cmd!("wordfreq")
        .args(["-c", "10", "-w", "3"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(contains("OK 3 files, 2 chunks"));

    let out = dir.child("output");
    out.child("results.txt").assert(
        "gamma 3\nthe 3\nbeta 2\ncat 2\nsat 2\nalpha 1\nmat 1\non 1\n",
    );
    out.child("story.txt_0.chunk")
        .assert("the 3\ncat 2\nsat 2\nmat 1\non 1\n");
    out.child("lines.txt_0.chunk")
        .assert("gamma 3\nbeta 2\nalpha 1\n");
    // empty input produces no chunk, stale files are cleared
    out.child("empty.txt_0.chunk").assert(predicate::path::missing());
    out.child("stale.chunk").assert(predicate::path::missing());
}

#[test]
fn single_file_output_goes_next_to_it() {
    let dir = assert_fs::TempDir::new().unwrap();
    let body: String = (0..25).map(|i| format!("Line {i} of text\n")).collect();
    dir.child("doc.txt").write_str(&body).unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("wordfreq")
        .current_dir(&dir)
        .args(["--chunk-size", "10", "--workers", "2", "doc.txt"])
        .assert()
        .success()
        .stderr(contains("OK 1 files, 3 chunks, 75 words (3 distinct)"));

    for i in 0..3 {
        dir.child(format!("output/doc.txt_{i}.chunk"))
            .assert(predicate::path::is_file());
    }
    let results = std::fs::read_to_string(dir.child("output/results.txt").path()).unwrap();
    assert_eq!(
        parse_report(&results),
        vec![
            ("line".to_string(), 25),
            ("of".to_string(), 25),
            ("text".to_string(), 25),
        ]
    );
}

#[test]
fn explicit_output_dir_is_used() {
    let dir = corpus();
    let target = dir.child("reports");

    assert_cmd::cargo::cargo_bin_cmd!("wordfreq")
        .args(["-c", "10", "-w", "1", "-o"])
        .arg(target.path())
        .arg(dir.child("story.txt").path())
        .assert()
        .success();

    target.child("results.txt").assert(contains("the 3"));
    dir.child("output/stale.chunk").assert(predicate::path::is_file());
}

#[test]
fn glob_rerun_skips_previous_output() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("a.txt").write_str("one two\n").unwrap();
    dir.child("b.txt").write_str("two\n").unwrap();
    let pattern = format!("{}/*", dir.path().display());

    for _ in 0..2 {
        assert_cmd::cargo::cargo_bin_cmd!("wordfreq")
            .args(["-c", "10", "-w", "2", "-o"])
            .arg(dir.child("output").path())
            .arg(&pattern)
            .assert()
            .success()
            .stderr(contains("OK 2 files, 2 chunks, 3 words"));

        dir.child("output/results.txt").assert("two 2\none 1\n");
    }
}
