use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use contribrank::output::{self, Reporter};
use contribrank::{Config, ContributionAnalyzer, HttpFetcher, RepoId};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository to analyze (owner/repo, GitHub URL or ssh remote)
    repo: String,

    /// GitHub token, raises the rate limit and allows private repositories
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output format (markdown, json, brief)
    #[arg(short, long)]
    output: Option<String>,

    /// Output file (extension added from the format)
    #[arg(long, default_value = "contributor_report")]
    output_file: String,

    /// Configuration file (defaults to ./contribrank.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of contributors to print in the terminal summary
    #[arg(long)]
    top: Option<usize>,

    /// Maximum attempts while GitHub computes contributor statistics
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Seconds to wait between statistics attempts
    #[arg(long)]
    poll_delay: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // CLI flags win over file and environment settings
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(max_attempts) = cli.max_attempts {
        config.polling.max_attempts = max_attempts;
    }
    if let Some(delay) = cli.poll_delay {
        config.polling.delay_secs = delay;
    }
    if !config.output.color_output {
        colored::control::set_override(false);
    }

    let repo = RepoId::parse(&cli.repo)?;

    println!(
        "{}",
        "ContribRank - GitHub Contributor Impact Ranking"
            .bright_cyan()
            .bold()
    );
    println!("Repository: {}", repo.html_url().bright_white());

    let fetcher = HttpFetcher::new(&config.github, cli.token.as_deref())
        .context("Failed to build GitHub client")?;
    let analyzer = ContributionAnalyzer::new(&fetcher, &config);

    // Spinner while GitHub computes statistics
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    spinner.set_message("Waiting for GitHub contributor statistics...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = analyzer.analyze(&repo).await;
    spinner.finish_and_clear();
    let report = result.with_context(|| format!("Analysis of {} failed", repo))?;

    info!(
        "Ranked {} contributors of {}",
        report.contributors.len(),
        repo
    );

    // Console summary first, then the report file
    output::terminal::print_summary(
        &report,
        cli.top.unwrap_or(config.output.top_contributors),
    );

    let format = cli
        .output
        .as_deref()
        .unwrap_or(&config.output.default_format);
    let reporter = Reporter::new(format, &cli.output_file, config.score_weights())?;
    reporter.generate_report(&report)?;

    println!("\n{}", "Analysis complete!".bright_green().bold());

    Ok(())
}
