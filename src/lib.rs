//! Ranks the contributors of a GitHub repository by combining the contributor statistics
//! endpoint with recently merged pull requests.

pub mod analysis;
pub mod config;
pub mod error;
pub mod github;
pub mod output;

pub use analysis::{AggregatedContributor, AnalysisReport, ContributionAnalyzer};
pub use config::Config;
pub use error::{AnalysisError, Result};
pub use github::{HttpFetcher, RepoId};
