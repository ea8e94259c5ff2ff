//! GitHub Actions Summary Output
//!
//! Markdown suitable for appending to `$GITHUB_STEP_SUMMARY`.

use crate::report::Report;
use gridjudge_core::format_nanos;
use std::fmt::Write;

/// Generate a Markdown summary of the run.
pub fn generate_github_summary(report: &Report) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let _ = writeln!(out, "# Test Matrix Results");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "**{}/{} combinations passed** across {} cases in {:.1} s",
        summary.accepted,
        summary.total_combinations,
        summary.total_cases,
        summary.total_duration_ms / 1000.0
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "| Case | Combination | Verdict | Time (ns) |");
    let _ = writeln!(out, "|------|-------------|---------|-----------|");
    for case in &report.cases {
        for run in &case.runs {
            let icon = if run.verdict.is_accepted() {
                "\u{2705}"
            } else {
                "\u{274c}"
            };
            let time = match run.verdict.time_ns() {
                Some(ns) => format_nanos(ns),
                None => "-".to_string(),
            };
            let _ = writeln!(
                out,
                "| {} | {} | {} {} | {} |",
                case.id,
                run.label,
                icon,
                run.verdict.code(),
                time
            );
        }
    }

    if !summary.failures.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "## Failures");
        let _ = writeln!(out);
        for failure in &summary.failures {
            let _ = writeln!(out, "- `{}`", failure);
        }
    }

    out
}
