use crate::error::{Result, ScoreError};
use crate::model::CommitRecord;
use csv::{ReaderBuilder, StringRecord};
use rayon::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

pub const FIELD_COUNT: usize = 6;

const TIMESTAMP: usize = 0;
const USERNAME: usize = 1;
const REPOSITORY: usize = 2;
const FILES: usize = 3;
const ADDITIONS: usize = 4;
const DELETIONS: usize = 5;

pub fn load_commits<P: AsRef<Path>>(path: P, parallel: bool) -> Result<Vec<CommitRecord>> {
    let file = File::open(path.as_ref())?;
    read_commits(file, parallel)
}

pub fn read_commits<R: Read>(mut reader: R, parallel: bool) -> Result<Vec<CommitRecord>> {
    let started = Instant::now();
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    check_quoting(&bytes)?;
    let rows = read_rows(bytes.as_slice())?;

    let commits: Vec<CommitRecord> = if parallel {
        rows.par_iter().map(decode_row).collect()
    } else {
        rows.iter().map(decode_row).collect()
    };

    info!(
        records = commits.len(),
        parallel,
        elapsed = ?started.elapsed(),
        "loaded commit records"
    );
    Ok(commits)
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

// The csv reader closes a dangling quote at end of input and keeps stray quotes in
// unquoted fields, so both are rejected before any row is parsed.
pub fn check_quoting(bytes: &[u8]) -> Result<()> {
    let mut state = QuoteState::FieldStart;
    let mut line: u64 = 1;
    let mut opened_at: u64 = 1;

    for &b in bytes {
        state = match (state, b) {
            (QuoteState::FieldStart, b'"') => {
                opened_at = line;
                QuoteState::Quoted
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, b',' | b'\r') => QuoteState::FieldStart,
            (QuoteState::FieldStart | QuoteState::Unquoted, b'\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => {
                if b == b'"' {
                    return Err(ScoreError::Quote {
                        line,
                        message: "bare \" in non-quoted field".to_string(),
                    });
                }
                QuoteState::Unquoted
            }
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, b'\n') => {
                line += 1;
                QuoteState::Quoted
            }
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b',' | b'\r') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, b'\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::QuoteInQuoted, _) => {
                return Err(ScoreError::Quote {
                    line,
                    message: "extraneous \" in quoted field".to_string(),
                });
            }
        };
    }

    if let QuoteState::Quoted = state {
        return Err(ScoreError::Quote {
            line: opened_at,
            message: "unterminated quoted field".to_string(),
        });
    }
    Ok(())
}

fn read_rows<R: Read>(reader: R) -> Result<Vec<StringRecord>> {
    // The first row is a header and is skipped without looking at it.
    let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut rows = Vec::new();
    for row in csv.records() {
        let row = row?;
        if row.len() < FIELD_COUNT {
            return Err(ScoreError::MissingField {
                line: row.position().map(|p| p.line()).unwrap_or(0),
                expected: FIELD_COUNT,
                found: row.len(),
            });
        }
        rows.push(row);
    }
    Ok(rows)
}

fn decode_row(row: &StringRecord) -> CommitRecord {
    CommitRecord {
        timestamp: row[TIMESTAMP].to_string(),
        username: row[USERNAME].to_string(),
        repository: row[REPOSITORY].to_string(),
        files_changed: parse_count(&row[FILES]),
        additions: parse_count(&row[ADDITIONS]),
        deletions: parse_count(&row[DELETIONS]),
    }
}

// Negative counts are malformed too.
pub fn parse_count(field: &str) -> u64 {
    match field.parse::<i64>() {
        Ok(n) if n >= 0 => n as u64,
        _ => {
            debug!(field, "malformed count, using 0");
            0
        }
    }
}
