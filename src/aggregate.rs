use crate::model::{CommitRecord, RepositoryAggregate};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    repos: HashMap<String, RepositoryAggregate>,
}

impl Aggregates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: &CommitRecord) {
        self.repos
            .entry(record.repository.clone())
            .or_insert_with(|| RepositoryAggregate::new(record.repository.clone()))
            .add_record(record);
    }

    pub fn merge(mut self, other: Aggregates) -> Self {
        // Fold the smaller map into the larger one.
        let (mut into, from) = if self.repos.len() >= other.repos.len() {
            (std::mem::take(&mut self.repos), other.repos)
        } else {
            (other.repos, std::mem::take(&mut self.repos))
        };
        for (repo, partial) in from {
            match into.get_mut(&repo) {
                Some(total) => total.merge(&partial),
                None => {
                    into.insert(repo, partial);
                }
            }
        }
        Self { repos: into }
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn get(&self, repository: &str) -> Option<&RepositoryAggregate> {
        self.repos.get(repository)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepositoryAggregate> {
        self.repos.values()
    }

    pub fn into_values(self) -> impl Iterator<Item = RepositoryAggregate> {
        self.repos.into_values()
    }

    pub fn scores(&self) -> HashMap<String, f64> {
        self.project(RepositoryAggregate::score)
    }

    pub fn files(&self) -> HashMap<String, u64> {
        self.project(|a| a.files)
    }

    pub fn additions(&self) -> HashMap<String, u64> {
        self.project(|a| a.additions)
    }

    pub fn deletions(&self) -> HashMap<String, u64> {
        self.project(|a| a.deletions)
    }

    fn project<T>(&self, f: impl Fn(&RepositoryAggregate) -> T) -> HashMap<String, T> {
        self.repos
            .iter()
            .map(|(repo, agg)| (repo.clone(), f(agg)))
            .collect()
    }
}

impl<'a> Extend<&'a CommitRecord> for Aggregates {
    fn extend<I: IntoIterator<Item = &'a CommitRecord>>(&mut self, iter: I) {
        for record in iter {
            self.add_record(record);
        }
    }
}

pub fn aggregate(records: &[CommitRecord]) -> Aggregates {
    let started = Instant::now();
    let mut aggregates = Aggregates::new();
    aggregates.extend(records);
    info!(
        records = records.len(),
        repositories = aggregates.len(),
        elapsed = ?started.elapsed(),
        "aggregated sequentially"
    );
    aggregates
}

// Each worker folds into a private map; partial maps are summed after the join.
pub fn aggregate_parallel(records: &[CommitRecord]) -> Aggregates {
    let started = Instant::now();
    let aggregates = records
        .par_iter()
        .fold(Aggregates::new, |mut acc, record| {
            acc.add_record(record);
            acc
        })
        .reduce(Aggregates::new, Aggregates::merge);
    info!(
        records = records.len(),
        repositories = aggregates.len(),
        elapsed = ?started.elapsed(),
        "aggregated in parallel"
    );
    aggregates
}
