use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod brief;
pub mod markdown;
pub mod reporter;
pub mod terminal;

pub use brief::NarrativeBrief;
pub use reporter::Reporter;

use crate::analysis::AnalysisReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Json,
    Markdown,
    Brief,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "brief" => OutputFormat::Brief,
            "md" | "markdown" => OutputFormat::Markdown,
            _ => OutputFormat::Markdown,
        }
    }
}

pub fn add_file_extension(path: &str, format: &OutputFormat) -> String {
    let extension = match format {
        OutputFormat::Markdown => ".md",
        OutputFormat::Json => ".json",
        OutputFormat::Brief => ".brief.json",
    };

    if path.ends_with(extension) {
        path.to_string()
    } else {
        format!("{}{}", path, extension)
    }
}

pub trait OutputGenerator {
    fn generate(&mut self, report: &AnalysisReport) -> Result<String>;
}
