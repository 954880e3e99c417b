use serde::{Deserialize, Serialize};
use tracing::info;

pub mod aggregator;
pub mod ranker;

pub use aggregator::aggregate;
pub use ranker::{rank, ScoreWeights};

use crate::config::Config;
use crate::error::Result;
use crate::github::{ActivityCollector, RepoId, StatsPoller, Transport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedContributor {
    pub login: String,
    pub avatar_url: String,
    pub total_commits: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub net_lines: i64,
    pub total_merged_requests: u64,
    /// Distinct weeks with at least one commit.
    pub active_weeks: u32,
    /// Commits per active week.
    pub velocity: f64,
    /// Share of weeks with commits between the first and last active week.
    pub consistency: f64,
    pub impact_score: f64,
}

impl AggregatedContributor {
    pub fn new(login: &str, avatar_url: &str) -> Self {
        Self {
            login: login.to_string(),
            avatar_url: avatar_url.to_string(),
            total_commits: 0,
            total_additions: 0,
            total_deletions: 0,
            net_lines: 0,
            total_merged_requests: 0,
            active_weeks: 0,
            velocity: 0.0,
            consistency: 0.0,
            impact_score: 0.0,
        }
    }

    pub fn lines_changed(&self) -> u64 {
        self.total_additions + self.total_deletions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub owner: String,
    pub repo: String,
    pub contributors: Vec<AggregatedContributor>,
    pub total_commits: u64,
    pub total_lines_changed: u64,
    pub merged_request_count: usize,
}

/// Runs one complete analysis against a transport. Nothing is kept between runs.
pub struct ContributionAnalyzer<'a, T> {
    transport: &'a T,
    config: &'a Config,
}

impl<'a, T: Transport> ContributionAnalyzer<'a, T> {
    pub fn new(transport: &'a T, config: &'a Config) -> Self {
        Self { transport, config }
    }

    pub async fn analyze(&self, repo: &RepoId) -> Result<AnalysisReport> {
        info!("Fetching contributor statistics and merged pull requests for {}", repo);

        let poller = StatsPoller::new(self.transport, self.config.retry_policy());
        let collector = ActivityCollector::new(self.transport, self.config.activity.page_size);

        let (stats, activity) = tokio::join!(poller.poll(repo), collector.collect(repo));
        let outcome = stats?;
        info!(
            "Contributor statistics ready after {} attempt(s), {} delayed retries",
            outcome.attempts, outcome.retries
        );
        let stats = outcome.stats;

        if activity.is_degraded() {
            info!("Merged pull request counts unavailable; ranking on commit statistics only");
        }
        let merged = activity.into_merged();

        let contributors = aggregate(&stats, &merged);
        info!(
            "Aggregated {} contributors from {} stat entries and {} merged pull requests",
            contributors.len(),
            stats.len(),
            merged.len()
        );

        Ok(rank(
            repo,
            contributors,
            merged.len(),
            &self.config.score_weights(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::github::testing::{contributor_json, pull_json, ScriptedTransport};
    use pretty_assertions::assert_eq;

    const STATS: &str = "/repos/o/r/stats/contributors";
    const PULLS: &str = "/repos/o/r/pulls";

    fn config() -> Config {
        let mut config = Config::default();
        config.polling.delay_secs = 0;
        config
    }

    fn repo() -> RepoId {
        RepoId::new("o", "r").unwrap()
    }

    #[tokio::test]
    async fn end_to_end_ranking() {
        let transport = ScriptedTransport::new()
            .respond(STATS, 202, "")
            .respond(
                STATS,
                200,
                &format!("[{}]", contributor_json("a", 10, &[(0, 100, 20, 10)])),
            )
            .respond(
                PULLS,
                200,
                &format!(
                    "[{},{},{}]",
                    pull_json(1, Some("a"), true),
                    pull_json(2, Some("b"), true),
                    pull_json(3, Some("c"), false)
                ),
            );
        let config = config();

        let report = ContributionAnalyzer::new(&transport, &config)
            .analyze(&repo())
            .await
            .unwrap();

        let order: Vec<&str> = report.contributors.iter().map(|c| c.login.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);

        let a = &report.contributors[0];
        assert_eq!(
            (a.total_commits, a.total_additions, a.total_deletions, a.net_lines),
            (10, 100, 20, 80)
        );
        assert_eq!(a.total_merged_requests, 1);
        assert!((a.impact_score - 26.2).abs() < 1e-9);

        let b = &report.contributors[1];
        assert_eq!((b.total_commits, b.net_lines, b.total_merged_requests), (0, 0, 1));
        assert_eq!(b.impact_score, 5.0);

        assert_eq!(report.total_commits, 10);
        assert_eq!(report.total_lines_changed, 120);
        assert_eq!(report.merged_request_count, 2);
    }

    #[tokio::test]
    async fn degraded_activity_still_produces_report() {
        let transport = ScriptedTransport::new()
            .respond(
                STATS,
                200,
                &format!(
                    "[{},{}]",
                    contributor_json("a", 4, &[(0, 10, 0, 4)]),
                    contributor_json("b", 2, &[])
                ),
            )
            .respond(PULLS, 403, r#"{"message":"API rate limit exceeded"}"#);
        let config = config();

        let report = ContributionAnalyzer::new(&transport, &config)
            .analyze(&repo())
            .await
            .unwrap();

        assert_eq!(report.merged_request_count, 0);
        assert_eq!(report.contributors.len(), 2);
        assert!(report
            .contributors
            .iter()
            .all(|c| c.total_merged_requests == 0));
        assert_eq!(report.total_commits, 6);
    }

    #[tokio::test]
    async fn merged_request_count_includes_anonymous_authors() {
        let transport = ScriptedTransport::new()
            .respond(STATS, 204, "")
            .respond(
                PULLS,
                200,
                &format!("[{},{}]", pull_json(1, None, true), pull_json(2, Some("x"), true)),
            );
        let config = config();

        let report = ContributionAnalyzer::new(&transport, &config)
            .analyze(&repo())
            .await
            .unwrap();

        assert_eq!(report.merged_request_count, 2);
        assert_eq!(report.contributors.len(), 1);
        assert_eq!(report.total_commits, 0);
    }

    #[tokio::test]
    async fn stats_failure_aborts_whole_analysis() {
        let transport = ScriptedTransport::new()
            .respond(STATS, 401, "")
            .respond(PULLS, 200, &format!("[{}]", pull_json(1, Some("a"), true)));
        let config = config();

        let result = ContributionAnalyzer::new(&transport, &config)
            .analyze(&repo())
            .await;

        assert!(matches!(result, Err(AnalysisError::Unauthorized)));
    }

    #[test]
    fn report_serializes_as_plain_record() {
        let report = rank(
            &repo(),
            vec![AggregatedContributor::new("a", "avatar")],
            0,
            &ScoreWeights::default(),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["owner"], "o");
        assert_eq!(json["contributors"][0]["login"], "a");
        assert_eq!(json["contributors"][0]["net_lines"], 0);
    }
}
