use std::cmp::Ordering;
use std::io::{self, Write};

use super::error::CountError;
use super::types::{FrequencyTable, RankedEntry};

/// Orders entries by count descending, then word ascending. The word is
/// unique within a table, so this is a strict total order.
pub fn compare_ranked(
    a: &RankedEntry,
    b: &RankedEntry,
) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word))
}

/// Produces the deterministic ranking of a table.
pub fn rank(table: &FrequencyTable) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = table
        .iter()
        .map(|(word, count)| RankedEntry {
            word: word.to_owned(),
            count,
        })
        .collect();
    entries.sort_unstable_by(compare_ranked);
    entries
}

/// Writes `<word> <count>\n` for every entry.
pub fn write_ranked<W: Write>(
    mut out: W,
    entries: &[RankedEntry],
) -> io::Result<()> {
    for e in entries {
        writeln!(out, "{} {}", e.word, e.count)?;
    }
    out.flush()
}

/// Renders a ranking as report text.
pub fn render(entries: &[RankedEntry]) -> String {
    let mut s = String::new();
    for e in entries {
        s.push_str(&e.word);
        s.push(' ');
        s.push_str(&e.count.to_string());
        s.push('\n');
    }
    s
}

/// Output collaborator: persists a ranked report under a destination name.
pub trait ReportSink: Send + Sync {
    fn write_report(
        &self,
        name: &str,
        entries: &[RankedEntry],
    ) -> Result<(), CountError>;
}

/// Ranks `table` and hands it to `sink` under `name`.
pub fn publish<S: ReportSink + ?Sized>(
    sink: &S,
    name: &str,
    table: &FrequencyTable,
) -> Result<(), CountError> {
    sink.write_report(name, &rank(table))
}
