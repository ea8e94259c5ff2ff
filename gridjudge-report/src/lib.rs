#![warn(missing_docs)]
//! GridJudge Report - Run Reporting
//!
//! Generates output formats for a finished run:
//! - JSON (machine-readable)
//! - GitHub Summary (Markdown for $GITHUB_STEP_SUMMARY)
//! - Human (plain terminal text, rendered by the CLI)

mod github;
mod json;
mod report;

pub use github::generate_github_summary;
pub use json::generate_json_report;
pub use report::{CaseReport, CombinationResult, Report, ReportMeta, Summary, SystemInfo};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// Markdown for GitHub Actions
    GithubSummary,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "github" | "github-summary" => Ok(OutputFormat::GithubSummary),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(
            "GitHub".parse::<OutputFormat>(),
            Ok(OutputFormat::GithubSummary)
        );
        assert_eq!(
            "github-summary".parse::<OutputFormat>(),
            Ok(OutputFormat::GithubSummary)
        );
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
