use super::fetcher::{classify, Classified, Transport};
use super::{MergeRequestStat, PullRequest, RepoId};
use tracing::{debug, warn};

/// Outcome of the merged pull request fetch.
///
/// `Degraded` is never an error for the caller: the analysis carries on with no merge data,
/// but the reason is kept so it can be reported.
#[derive(Debug)]
pub enum ActivityFetch {
    Fetched(Vec<MergeRequestStat>),
    Degraded { reason: String },
}

impl ActivityFetch {
    pub fn is_degraded(&self) -> bool {
        matches!(self, ActivityFetch::Degraded { .. })
    }

    pub fn merged(&self) -> &[MergeRequestStat] {
        match self {
            ActivityFetch::Fetched(merged) => merged,
            ActivityFetch::Degraded { .. } => &[],
        }
    }

    pub fn into_merged(self) -> Vec<MergeRequestStat> {
        match self {
            ActivityFetch::Fetched(merged) => merged,
            ActivityFetch::Degraded { .. } => Vec::new(),
        }
    }
}

pub struct ActivityCollector<'a, T> {
    transport: &'a T,
    page_size: u32,
}

impl<'a, T: Transport> ActivityCollector<'a, T> {
    pub fn new(transport: &'a T, page_size: u32) -> Self {
        Self {
            transport,
            page_size,
        }
    }

    /// Fetches one page of recently updated closed pull requests and keeps the merged ones.
    pub async fn collect(&self, repo: &RepoId) -> ActivityFetch {
        let query = [
            ("state", "closed".to_string()),
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", self.page_size.to_string()),
        ];

        let fetch = match self.transport.get(&repo.pulls_path(), &query).await {
            Ok(response) => match classify(response) {
                Classified::Ready(body) => Self::decode(&body),
                Classified::NoContent => ActivityFetch::Fetched(Vec::new()),
                Classified::Computing => ActivityFetch::Degraded {
                    reason: "pull request listing not ready (HTTP 202)".to_string(),
                },
                Classified::Failed(err) => ActivityFetch::Degraded {
                    reason: err.to_string(),
                },
            },
            Err(err) => ActivityFetch::Degraded {
                reason: err.to_string(),
            },
        };

        match &fetch {
            ActivityFetch::Fetched(merged) => {
                debug!("Found {} merged pull requests for {}", merged.len(), repo)
            }
            ActivityFetch::Degraded { reason } => warn!(
                "Failed to fetch pull requests for {}, continuing without them: {}",
                repo, reason
            ),
        }

        fetch
    }

    fn decode(body: &str) -> ActivityFetch {
        match serde_json::from_str::<Vec<PullRequest>>(body) {
            Ok(pulls) => ActivityFetch::Fetched(
                pulls
                    .into_iter()
                    .filter_map(PullRequest::into_merged)
                    .collect(),
            ),
            Err(err) => ActivityFetch::Degraded {
                reason: format!("malformed pull request listing: {}", err),
            },
        }
    }
}
