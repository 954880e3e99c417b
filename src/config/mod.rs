use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::analysis::ranker::ScoreWeights;
use crate::github::poller::RetryPolicy;

const DEFAULT_CONFIG_FILE: &str = "contribrank.toml";
const ENV_PREFIX: &str = "CONTRIBRANK";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub polling: PollingConfig,
    pub activity: ActivityConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_base: String,
    pub user_agent: String,
    pub accept: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub max_attempts: u32,
    pub delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub commit_weight: f64,
    pub merged_request_weight: f64,
    pub lines_cap: u64,
    pub lines_divisor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
    pub top_contributors: usize,
    pub color_output: bool,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            user_agent: format!("contribrank/{}", env!("CARGO_PKG_VERSION")),
            accept: "application/vnd.github.v3+json".to_string(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            delay_secs: 2,
        }
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self { page_size: 100 }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            commit_weight: 2.0,
            merged_request_weight: 5.0,
            lines_cap: 100_000,
            lines_divisor: 100.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "markdown".to_string(),
            top_contributors: 10,
            color_output: true,
        }
    }
}

impl Config {
    /// Layers built-in defaults, an optional TOML file and `CONTRIBRANK__*` environment
    /// variables, in that order of precedence.
    ///
    /// An explicit `path` must exist; otherwise `contribrank.toml` in the working directory
    /// is picked up when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.polling.max_attempts.max(1),
            delay: Duration::from_secs(self.polling.delay_secs),
        }
    }

    pub fn score_weights(&self) -> ScoreWeights {
        ScoreWeights {
            commit: self.scoring.commit_weight,
            merged_request: self.scoring.merged_request_weight,
            lines_cap: self.scoring.lines_cap,
            lines_divisor: self.scoring.lines_divisor,
        }
    }
}
