use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

// Contributions are summed as whole hundredths so totals do not depend on fold order.
pub const CENTIS_PER_POINT: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub timestamp: String,
    pub username: String,
    pub repository: String,
    pub files_changed: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl CommitRecord {
    // 1.0 + 0.10 * files + 0.01 * (additions + deletions)
    pub fn score_centis(&self) -> u64 {
        CENTIS_PER_POINT
            .saturating_add(self.files_changed.saturating_mul(10))
            .saturating_add(self.additions)
            .saturating_add(self.deletions)
    }

    pub fn score_contribution(&self) -> f64 {
        centis_to_score(self.score_centis())
    }
}

pub fn centis_to_score(centis: u64) -> f64 {
    centis as f64 / CENTIS_PER_POINT as f64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryAggregate {
    pub repository: String,
    pub score_centis: u64,
    pub files: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl RepositoryAggregate {
    pub fn new(repository: String) -> Self {
        Self {
            repository,
            score_centis: 0,
            files: 0,
            additions: 0,
            deletions: 0,
        }
    }

    pub fn add_record(&mut self, record: &CommitRecord) {
        self.score_centis = self.score_centis.saturating_add(record.score_centis());
        self.files = self.files.saturating_add(record.files_changed);
        self.additions = self.additions.saturating_add(record.additions);
        self.deletions = self.deletions.saturating_add(record.deletions);
    }

    pub fn merge(&mut self, other: &RepositoryAggregate) {
        self.score_centis = self.score_centis.saturating_add(other.score_centis);
        self.files = self.files.saturating_add(other.files);
        self.additions = self.additions.saturating_add(other.additions);
        self.deletions = self.deletions.saturating_add(other.deletions);
    }

    pub fn score(&self) -> f64 {
        centis_to_score(self.score_centis)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub repository: String,
    pub score: f64,
    pub files: u64,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub total_records: usize,
    pub total_repositories: usize,
    pub top: usize,
    pub entries: Vec<RankedEntry>,
}
