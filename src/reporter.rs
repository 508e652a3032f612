use crate::models::{AnalysisReport, IssueSeverity, IssueSummary, RankingInfo, SeoIssue};
use crate::recommendations::recommend;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use colored::*;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    pub fn assemble(url: &str, ranking: RankingInfo, issues: Vec<SeoIssue>) -> AnalysisReport {
        let recommendations = recommend(&issues);
        let analyzed_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        AnalysisReport {
            url: url.to_string(),
            ranking,
            issues,
            recommendations,
            analyzed_at,
        }
    }

    pub fn summarize(issues: &[SeoIssue]) -> IssueSummary {
        let mut summary = IssueSummary::default();

        for issue in issues {
            match issue.severity {
                IssueSeverity::Error => summary.errors += 1,
                IssueSeverity::Warning => summary.warnings += 1,
                IssueSeverity::Info => summary.infos += 1,
            }
        }

        summary
    }

    pub fn print_text_report(report: &AnalysisReport) {
        let summary = Self::summarize(&report.issues);

        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "onpage - SEO Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "URL".bright_white().bold(), report.url);
        println!(
            "{}: {}",
            "Analyzed at".bright_white().bold(),
            report.analyzed_at
        );
        println!();

        println!("{}", "Ranking".bright_yellow().bold().underline());
        println!("  Google: {}", report.ranking.google_ranking);
        println!("  Alexa:  {}", report.ranking.alexa_ranking.dimmed());
        println!();

        println!("{}", "Summary".bright_yellow().bold().underline());
        println!(
            "  Errors:   {}",
            if summary.errors > 0 {
                summary.errors.to_string().bright_red()
            } else {
                summary.errors.to_string().bright_green()
            }
        );
        println!(
            "  Warnings: {}",
            if summary.warnings > 0 {
                summary.warnings.to_string().yellow()
            } else {
                summary.warnings.to_string().bright_green()
            }
        );
        println!("  Info:     {}", summary.infos.to_string().bright_cyan());

        if !report.issues.is_empty() {
            println!();
            println!("{}", "Issues".bright_yellow().bold().underline());
            for issue in &report.issues {
                let severity_str = match issue.severity {
                    IssueSeverity::Error => "ERROR".bright_red(),
                    IssueSeverity::Warning => "WARN ".yellow(),
                    IssueSeverity::Info => "INFO ".bright_cyan(),
                };
                println!(
                    "  [{}] {}: {}",
                    severity_str,
                    issue.issue_type.as_str().bright_white(),
                    issue.description
                );
            }
        }

        if !report.recommendations.is_empty() {
            println!();
            println!("{}", "Recommendations".bright_yellow().bold().underline());
            for recommendation in &report.recommendations {
                println!("  - {}", recommendation);
            }
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn save_json_report(report: &AnalysisReport, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(filename)
            .with_context(|| format!("Failed to create report file: {}", filename))?;
        file.write_all(json.as_bytes())?;
        println!("Report saved to: {}", filename.bright_green());
        Ok(())
    }
}
