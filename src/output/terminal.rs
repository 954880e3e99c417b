use crate::analysis::AnalysisReport;
use colored::*;

/// Prints rollups and the leading contributors to stdout.
pub fn print_summary(report: &AnalysisReport, top: usize) {
    println!(
        "\n{} {}",
        "Repository:".bright_white().bold(),
        format!("{}/{}", report.owner, report.repo).bright_cyan()
    );
    println!(
        "  Contributors: {}  Commits: {}  Lines changed: {}  Merged PRs analyzed: {}",
        report.contributors.len().to_string().bright_white(),
        report.total_commits.to_string().bright_white(),
        report.total_lines_changed.to_string().bright_white(),
        report.merged_request_count.to_string().bright_white()
    );

    if report.contributors.is_empty() {
        println!("{}", "  No contributor activity found.".yellow());
        return;
    }

    println!(
        "\n  {:>3}  {:<24} {:>9} {:>8} {:>6} {:>10}",
        "#", "Contributor", "Score", "Commits", "PRs", "Net lines"
    );
    for (i, c) in report.contributors.iter().take(top).enumerate() {
        let net = if c.net_lines >= 0 {
            format!("+{}", c.net_lines).green()
        } else {
            c.net_lines.to_string().red()
        };
        let login = if i == 0 {
            c.login.bright_yellow().bold()
        } else {
            c.login.normal()
        };
        println!(
            "  {:>3}  {:<24} {:>9.1} {:>8} {:>6} {:>10}",
            i + 1,
            login,
            c.impact_score,
            c.total_commits,
            c.total_merged_requests,
            net
        );
    }

    if report.contributors.len() > top {
        println!(
            "  {}",
            format!("... and {} more", report.contributors.len() - top).dimmed()
        );
    }
}
