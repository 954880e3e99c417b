use crate::error::{AnalysisError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static SSH_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:ssh://)?git@[^:/]+[:/](.+)$").expect("ssh remote pattern is valid")
});

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();
        if owner.is_empty() || repo.is_empty() {
            return Err(AnalysisError::InvalidRepository(format!("{}/{}", owner, repo)));
        }
        Ok(Self { owner, repo })
    }

    /// Accepts `owner/repo`, `github.com/owner/repo`, an http(s) URL, or an ssh remote like
    /// `git@github.com:owner/repo.git`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || AnalysisError::InvalidRepository(input.to_string());

        let path = if let Some(path) = Self::ssh_path(trimmed) {
            path
        } else if let Some(rest) = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
        {
            // drop the host
            rest.split_once('/').map(|(_, path)| path).ok_or_else(invalid)?
        } else {
            Self::strip_bare_host(trimmed)
        };

        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments.next().ok_or_else(invalid)?;
        let repo = segments.next().ok_or_else(invalid)?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        Self::new(owner, repo).map_err(|_| invalid())
    }

    fn ssh_path(url: &str) -> Option<&str> {
        let captures = SSH_REMOTE.captures(url)?;
        Some(captures.get(1)?.as_str())
    }

    // Owners never contain a dot, so a dotted first segment is a host like `github.com`.
    fn strip_bare_host(path: &str) -> &str {
        match path.split_once('/') {
            Some((host, rest)) if host.contains('.') => rest,
            _ => path,
        }
    }

    pub fn contributor_stats_path(&self) -> String {
        format!("/repos/{}/{}/stats/contributors", self.owner, self.repo)
    }

    pub fn pulls_path(&self) -> String {
        format!("/repos/{}/{}/pulls", self.owner, self.repo)
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
