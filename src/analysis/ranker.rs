use super::{AggregatedContributor, AnalysisReport};
use crate::github::RepoId;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub commit: f64,
    pub merged_request: f64,
    /// Combined additions + deletions beyond this count add nothing to the score.
    pub lines_cap: u64,
    pub lines_divisor: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            commit: 2.0,
            merged_request: 5.0,
            lines_cap: 100_000,
            lines_divisor: 100.0,
        }
    }
}

impl ScoreWeights {
    pub fn score(&self, contributor: &AggregatedContributor) -> f64 {
        let lines_changed = contributor.lines_changed().min(self.lines_cap);
        contributor.total_commits as f64 * self.commit
            + contributor.total_merged_requests as f64 * self.merged_request
            + lines_changed as f64 / self.lines_divisor
    }
}

/// Scores and orders contributors, then computes the repository rollups.
///
/// The sort is stable, so equal scores keep their aggregation order.
pub fn rank(
    repo: &RepoId,
    mut contributors: Vec<AggregatedContributor>,
    merged_request_count: usize,
    weights: &ScoreWeights,
) -> AnalysisReport {
    for contributor in &mut contributors {
        contributor.impact_score = weights.score(contributor);
    }
    contributors.sort_by(|a, b| {
        b.impact_score
            .partial_cmp(&a.impact_score)
            .unwrap_or(Ordering::Equal)
    });

    let total_commits = contributors.iter().map(|c| c.total_commits).sum();
    let total_lines_changed = contributors.iter().map(|c| c.lines_changed()).sum();

    AnalysisReport {
        owner: repo.owner.clone(),
        repo: repo.repo.clone(),
        contributors,
        total_commits,
        total_lines_changed,
        merged_request_count,
    }
}
