use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod activity;
pub mod fetcher;
pub mod links;
pub mod poller;

#[cfg(test)]
pub(crate) mod testing;

pub use activity::{ActivityCollector, ActivityFetch};
pub use fetcher::{HttpFetcher, RawResponse, Transport};
pub use links::RepoId;
pub use poller::{PollOutcome, RetryPolicy, StatsPoller};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// One contributor entry of `/repos/{owner}/{repo}/stats/contributors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStat {
    /// `null` for deleted ("ghost") accounts.
    pub author: Option<Author>,
    pub total: u64,
    #[serde(default)]
    pub weeks: Vec<WeeklyBucket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// Start of the week, unix seconds.
    #[serde(rename = "w")]
    pub week_start: i64,
    #[serde(rename = "a")]
    pub additions: u64,
    #[serde(rename = "d")]
    pub deletions: u64,
    #[serde(rename = "c")]
    pub commits: u64,
}

/// A closed pull request as returned by the pulls listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub user: Option<Author>,
    pub merged_at: Option<DateTime<Utc>>,
}

/// A pull request that actually reached the merged state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequestStat {
    pub number: u64,
    pub title: String,
    pub author: Option<Author>,
    pub merged_at: DateTime<Utc>,
}

impl PullRequest {
    pub fn into_merged(self) -> Option<MergeRequestStat> {
        let merged_at = self.merged_at?;
        Some(MergeRequestStat {
            number: self.number,
            title: self.title,
            author: self.user,
            merged_at,
        })
    }
}
