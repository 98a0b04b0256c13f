use crate::aggregate::{aggregate, aggregate_parallel, Aggregates};
use crate::cli::{ExecArgs, OutputFormat};
use crate::loader::load_commits;
use crate::model::{CommitRecord, RankedEntry};
use crate::output::{output_json, output_ndjson, output_table};
use crate::rank::{rank, top};
use anyhow::Context;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub total_records: usize,
    pub total_repositories: usize,
    pub entries: Vec<RankedEntry>,
}

pub fn exec(input: &Path, top_n: usize, format: OutputFormat, args: &ExecArgs) -> anyhow::Result<()> {
    let started = Instant::now();

    let report = match args.jobs.filter(|_| args.parallel()) {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Failed to build worker pool")?
            .install(|| compute(input, true)),
        None => compute(input, args.parallel()),
    }?;

    let shown = top(&report.entries, top_n);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => output_table(&mut out, shown, top_n, started.elapsed())?,
        OutputFormat::Json => output_json(
            &mut out,
            shown,
            &input.to_string_lossy(),
            report.total_records,
            report.total_repositories,
            top_n,
        )?,
        OutputFormat::Ndjson => output_ndjson(&mut out, shown)?,
    }
    out.flush()?;
    Ok(())
}

pub fn compute(input: &Path, parallel: bool) -> anyhow::Result<ScoreReport> {
    let commits = load_commits(input, parallel)
        .with_context(|| format!("Failed to load commit records from {}", input.display()))?;
    Ok(score_commits(&commits, parallel))
}

pub fn score_commits(commits: &[CommitRecord], parallel: bool) -> ScoreReport {
    let aggregates: Aggregates = if parallel {
        aggregate_parallel(commits)
    } else {
        aggregate(commits)
    };
    let total_repositories = aggregates.len();
    ScoreReport {
        total_records: commits.len(),
        total_repositories,
        entries: rank(aggregates),
    }
}
