use crate::aggregate::Aggregates;
use crate::model::{RankedEntry, RepositoryAggregate};

pub const DEFAULT_TOP: usize = 10;

// Equal scores fall back to ascending repository name.
pub fn rank(aggregates: Aggregates) -> Vec<RankedEntry> {
    let mut repos: Vec<RepositoryAggregate> = aggregates.into_values().collect();
    repos.sort_by(|a, b| {
        b.score_centis
            .cmp(&a.score_centis)
            .then_with(|| a.repository.cmp(&b.repository))
    });

    repos
        .into_iter()
        .enumerate()
        .map(|(i, agg)| RankedEntry {
            rank: i + 1,
            score: agg.score(),
            repository: agg.repository,
            files: agg.files,
            additions: agg.additions,
            deletions: agg.deletions,
        })
        .collect()
}

pub fn top(entries: &[RankedEntry], n: usize) -> &[RankedEntry] {
    if n == 0 {
        entries
    } else {
        &entries[..n.min(entries.len())]
    }
}
