use super::*;
use crate::analysis::{AnalysisReport, ScoreWeights};
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use super::brief::BriefGenerator;
use super::markdown::MarkdownGenerator;

pub struct Reporter {
    format: OutputFormat,
    output_path: String,
    weights: ScoreWeights,
}

impl Reporter {
    pub fn new(format: &str, output_path: &str, weights: ScoreWeights) -> Result<Self> {
        let format = OutputFormat::from(format);
        let output_path = super::add_file_extension(output_path, &format);

        Ok(Self {
            format,
            output_path,
            weights,
        })
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn render(&self, report: &AnalysisReport) -> Result<String> {
        match self.format {
            OutputFormat::Markdown => MarkdownGenerator::new(self.weights)?.generate(report),
            OutputFormat::Brief => BriefGenerator.generate(report),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport) -> Result<()> {
        let content = self.render(report)?;

        fs::write(&self.output_path, content)
            .with_context(|| format!("Failed to write report to {}", self.output_path))?;
        info!("Report saved to {}", self.output_path);
        Ok(())
    }
}
