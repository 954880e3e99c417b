use super::fetcher::{classify, Classified, RawResponse, Transport};
use super::{ContributorStat, RepoId};
use crate::error::{AnalysisError, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            delay: Duration::from_secs(2),
        }
    }
}

/// Result of interpreting one stats response.
#[derive(Debug)]
pub enum PollState {
    Ready(Vec<ContributorStat>),
    /// Still computing, or a body that is not yet the expected array.
    Pending,
}

/// Terminal success of a poll along with what it cost.
#[derive(Debug)]
pub struct PollOutcome {
    pub stats: Vec<ContributorStat>,
    pub attempts: u32,
    pub retries: u32,
}

/// Maps one response onto the poll state machine. Fatal statuses come back as `Err`.
pub fn interpret(response: RawResponse) -> Result<PollState> {
    match classify(response) {
        Classified::Ready(body) => {
            let value: Value = serde_json::from_str(&body)?;
            if value.is_array() {
                Ok(PollState::Ready(serde_json::from_value(value)?))
            } else {
                Ok(PollState::Pending)
            }
        }
        Classified::Computing => Ok(PollState::Pending),
        Classified::NoContent => Ok(PollState::Ready(Vec::new())),
        Classified::Failed(err) => Err(err),
    }
}

pub struct StatsPoller<'a, T> {
    transport: &'a T,
    policy: RetryPolicy,
}

impl<'a, T: Transport> StatsPoller<'a, T> {
    pub fn new(transport: &'a T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub async fn poll(&self, repo: &RepoId) -> Result<PollOutcome> {
        let path = repo.contributor_stats_path();
        let mut retries = 0;

        for attempt in 1..=self.policy.max_attempts {
            let response = self.transport.get(&path, &[]).await?;
            debug!(
                "Contributor stats attempt {}/{}: HTTP {}",
                attempt, self.policy.max_attempts, response.status
            );

            match interpret(response)? {
                PollState::Ready(stats) => {
                    info!(
                        "Received statistics for {} contributors after {} attempt(s)",
                        stats.len(),
                        attempt
                    );
                    return Ok(PollOutcome {
                        stats,
                        attempts: attempt,
                        retries,
                    });
                }
                PollState::Pending if attempt < self.policy.max_attempts => {
                    debug!(
                        "GitHub is still computing statistics for {}, retrying in {:?}",
                        repo, self.policy.delay
                    );
                    tokio::time::sleep(self.policy.delay).await;
                    retries += 1;
                }
                PollState::Pending => {}
            }
        }

        Err(AnalysisError::PollTimeout {
            attempts: self.policy.max_attempts,
        })
    }
}
