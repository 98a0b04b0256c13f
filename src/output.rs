use crate::model::{RankedEntry, ScoreOutput, SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use std::io::Write;
use std::time::Duration;

const BANNER_WIDTH: usize = 80;

pub fn banner() -> String {
    "-".repeat(BANNER_WIDTH)
}

pub fn title(top: usize) -> String {
    if top == 0 {
        "All Repository Scores (Descending Order):".to_string()
    } else {
        format!("Top{} Repository Scores (Descending Order):", top)
    }
}

pub fn header_row() -> String {
    format!(
        "{:>2} - {:<9} - {:>10} - {:>5} - {:>10} - {:>10}",
        "#", "REPO", "SCORE", "FILES", "ADDITIONS", "DELETIONS"
    )
}

pub fn entry_row(entry: &RankedEntry) -> String {
    format!(
        "{:>2} - {:<9} - {:>10.2} - {:>5} - {:>10} - {:>10}",
        entry.rank, entry.repository, entry.score, entry.files, entry.additions, entry.deletions
    )
}

pub fn render_table(entries: &[RankedEntry], top: usize) -> String {
    let mut lines = vec![banner(), title(top), banner(), header_row()];
    lines.extend(entries.iter().map(entry_row));
    lines.push(banner());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn output_table<W: Write>(
    out: &mut W,
    entries: &[RankedEntry],
    top: usize,
    elapsed: Duration,
) -> Result<()> {
    write!(out, "{}", render_table(entries, top))?;
    writeln!(out, "Elapsed time: {}", humantime::format_duration(elapsed))?;
    Ok(())
}

pub fn output_json<W: Write>(
    out: &mut W,
    entries: &[RankedEntry],
    input_path: &str,
    total_records: usize,
    total_repositories: usize,
    top: usize,
) -> Result<()> {
    let output = ScoreOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: input_path.to_string(),
        total_records,
        total_repositories,
        top,
        entries: entries.to_vec(),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

pub fn output_ndjson<W: Write>(out: &mut W, entries: &[RankedEntry]) -> Result<()> {
    for e in entries {
        writeln!(out, "{}", serde_json::to_string(e)?)?;
    }
    Ok(())
}
