//! Console Progress Output
//!
//! Prints the classic one-line-per-case progress view: the case ID
//! followed by one colored label per combination, green with the run
//! time for accepted runs, red with the judge code otherwise.

use colored::Colorize;
use gridjudge_core::{Verdict, format_nanos};
use gridjudge_report::{Report, Summary};
use std::io;
use std::io::Write;

/// Progress hooks for a matrix run
pub trait Reporter {
    /// Called once before the first case.
    fn on_run_start(&mut self, _cases: usize) {}
    /// Called when a case begins.
    fn on_case_start(&mut self, _id: &str) {}
    /// Called after each combination with its verdict.
    fn on_combination(&mut self, _id: &str, _label: &str, _verdict: &Verdict) {}
    /// Called when a case's combinations are all done.
    fn on_case_complete(&mut self, _id: &str) {}
    /// Called once with the final summary.
    fn on_run_complete(&mut self, _summary: &Summary) {}
}

/// Reporter that prints progress to stdout as verdicts arrive
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Create a console reporter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn on_run_start(&mut self, cases: usize) {
        println!("{} test cases.", cases);
    }

    fn on_case_start(&mut self, id: &str) {
        print!("{}: \t", id);
        let _ = io::stdout().flush();
    }

    fn on_combination(&mut self, _id: &str, label: &str, verdict: &Verdict) {
        print!("{}\t", combination_label(label, verdict));
        let _ = io::stdout().flush();
    }

    fn on_case_complete(&mut self, _id: &str) {
        println!();
    }

    fn on_run_complete(&mut self, summary: &Summary) {
        if summary.all_passed() {
            println!("Passed all test cases");
        } else {
            println!("Failed: ");
            for failure in &summary.failures {
                println!("{}", failure);
            }
        }
    }
}

/// Reporter that swallows all progress events
pub struct SilentReporter;

impl Reporter for SilentReporter {}

fn combination_label(label: &str, verdict: &Verdict) -> String {
    match verdict.time_ns() {
        Some(ns) => format!("{}({})", label, format_nanos(ns)).green().to_string(),
        None => format!("{}({})", label, verdict.code()).red().to_string(),
    }
}

/// Render the finished run the way the console shows it, uncolored.
pub fn format_human_summary(report: &Report) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    let _ = writeln!(out, "{} test cases.", report.summary.total_cases);
    for case in &report.cases {
        let _ = write!(out, "{}: ", case.id);
        for run in &case.runs {
            let rendered = match run.verdict.time_ns() {
                Some(ns) => format!("{}({})", run.label, format_nanos(ns)),
                None => format!("{}({})", run.label, run.verdict.code()),
            };
            let _ = write!(out, "\t{}", rendered);
        }
        let _ = writeln!(out);
    }
    if report.summary.all_passed() {
        let _ = writeln!(out, "Passed all test cases");
    } else {
        let _ = writeln!(out, "Failed: ");
        for failure in &report.summary.failures {
            let _ = writeln!(out, "{}", failure);
        }
    }
    out
}
