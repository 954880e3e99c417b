use super::OutputGenerator;
use crate::analysis::AnalysisReport;
use anyhow::Result;
use serde::{Deserialize, Serialize};

const BRIEF_CONTRIBUTORS: usize = 10;

/// Summary payload handed to an external narrative generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeBrief {
    pub owner: String,
    pub repo: String,
    pub total_commits: u64,
    pub total_lines_changed: u64,
    pub merged_request_count: usize,
    pub top_contributors: Vec<BriefContributor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefContributor {
    pub name: String,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub merged_requests: u64,
}

impl From<&AnalysisReport> for NarrativeBrief {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            owner: report.owner.clone(),
            repo: report.repo.clone(),
            total_commits: report.total_commits,
            total_lines_changed: report.total_lines_changed,
            merged_request_count: report.merged_request_count,
            top_contributors: report
                .contributors
                .iter()
                .take(BRIEF_CONTRIBUTORS)
                .map(|c| BriefContributor {
                    name: c.login.clone(),
                    commits: c.total_commits,
                    additions: c.total_additions,
                    deletions: c.total_deletions,
                    merged_requests: c.total_merged_requests,
                })
                .collect(),
        }
    }
}

pub struct BriefGenerator;

impl OutputGenerator for BriefGenerator {
    fn generate(&mut self, report: &AnalysisReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(&NarrativeBrief::from(report))?)
    }
}
