use super::OutputGenerator;
use crate::analysis::{AnalysisReport, ScoreWeights};
use anyhow::Result;
use chrono::Utc;
use rust_embed::RustEmbed;
use serde_json::Value;
use std::collections::HashMap;
use tera::{Context, Tera};

#[derive(RustEmbed)]
#[folder = "src/output/templates/"]
#[include = "*.md"]
struct Templates;

const REPORT_TEMPLATE: &str = "report.md";

pub struct MarkdownGenerator {
    tera: Tera,
    weights: ScoreWeights,
}

impl MarkdownGenerator {
    pub fn new(weights: ScoreWeights) -> Result<Self> {
        let mut tera = Tera::default();

        // Load templates from embedded resources
        for file in Templates::iter() {
            let template_name = file.as_ref();
            let template_content = Templates::get(template_name)
                .ok_or_else(|| anyhow::anyhow!("Template {} not found", template_name))?;
            let template_str = std::str::from_utf8(&template_content.data).map_err(|e| {
                anyhow::anyhow!("Invalid UTF-8 in template {}: {}", template_name, e)
            })?;

            tera.add_raw_template(template_name, template_str)
                .map_err(|e| anyhow::anyhow!("Failed to add template {}: {}", template_name, e))?;
        }

        // Add custom filters
        tera.register_filter("signed", Self::signed_filter);
        tera.register_filter("percent", Self::percent_filter);

        Ok(Self { tera, weights })
    }

    fn signed_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let n = value.as_i64().unwrap_or(0);
        let text = if n > 0 {
            format!("+{}", n)
        } else {
            n.to_string()
        };
        Ok(Value::String(text))
    }

    fn percent_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let ratio = value.as_f64().unwrap_or(0.0);
        Ok(Value::String(format!("{:.0}%", ratio * 100.0)))
    }

    fn prepare_template_context(&self, report: &AnalysisReport) -> Result<Context> {
        let mut context = Context::from_serialize(report)?;
        context.insert("weights", &self.weights);
        context.insert(
            "generated_at",
            &Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        Ok(context)
    }
}

impl OutputGenerator for MarkdownGenerator {
    fn generate(&mut self, report: &AnalysisReport) -> Result<String> {
        let context = self.prepare_template_context(report)?;
        self.tera
            .render(REPORT_TEMPLATE, &context)
            .map_err(|e| anyhow::anyhow!("Failed to render {}: {:?}", REPORT_TEMPLATE, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{rank, AggregatedContributor};
    use crate::github::RepoId;

    fn report() -> AnalysisReport {
        let mut a = AggregatedContributor::new("alice", "");
        a.total_commits = 10;
        a.total_additions = 100;
        a.total_deletions = 20;
        a.net_lines = 80;
        a.total_merged_requests = 1;
        a.consistency = 0.5;
        let mut b = AggregatedContributor::new("bob", "");
        b.total_deletions = 30;
        b.net_lines = -30;

        rank(
            &RepoId::new("acme", "widgets").unwrap(),
            vec![b, a],
            2,
            &ScoreWeights::default(),
        )
    }

    #[test]
    fn renders_ranking_table() {
        let mut generator = MarkdownGenerator::new(ScoreWeights::default()).unwrap();
        let markdown = generator.generate(&report()).unwrap();

        assert!(markdown.contains("# Contributor report: acme/widgets"));
        assert!(markdown.contains("| Total commits | 10 |"));
        assert!(markdown.contains("| Lines changed | 150 |"));
        assert!(markdown.contains("+80"));
        assert!(markdown.contains("-30"));
        assert!(markdown.contains("50%"));

        let alice = markdown.find("[alice]").unwrap();
        let bob = markdown.find("[bob]").unwrap();
        assert!(alice < bob);
    }

    #[test]
    fn signed_filter_marks_positive_values() {
        let args = HashMap::new();
        assert_eq!(
            MarkdownGenerator::signed_filter(&Value::from(5), &args).unwrap(),
            Value::String("+5".into())
        );
        assert_eq!(
            MarkdownGenerator::signed_filter(&Value::from(0), &args).unwrap(),
            Value::String("0".into())
        );
    }
}
