#![warn(missing_docs)]
//! # GridJudge
//!
//! Correctness and timing harness for instruction-set simulators.
//!
//! GridJudge builds the target once, then walks a matrix of test cases,
//! compilers, and optimization levels:
//! - **Isolated Runs**: Every run works in its own scratch directory; parallel invocations never collide
//! - **Open Compiler Set**: Profiles are argv templates in grid.toml, not hard-coded toolchains
//! - **Byte-Exact Judging**: Output is diffed against golden answers, run time parsed from the metrics stream
//! - **Colored Progress**: One line per case, a green time or a red judge code per combination
//! - **CI Integration**: JSON and GitHub Actions summary reports, a distinct exit code for rejected runs
//!
//! ## Quick Start
//!
//! ```ignore
//! fn main() {
//!     if let Err(err) = gridjudge::run() {
//!         eprintln!("Error: {err:#}");
//!         std::process::exit(gridjudge::EXIT_FATAL);
//!     }
//! }
//! ```

// Re-export core types
pub use gridjudge_core::{
    CommandSpec, CompilerError, CompilerProfile, DEFAULT_TIMEOUT_NS, InstructionCounts, Metrics,
    MetricsError, OutputSink, ProcessError, Scratch, ScratchError, TestCase, Verdict,
    default_cases, format_nanos, parse_metrics, read_metrics,
};

// Re-export report types
pub use gridjudge_report::{
    CaseReport, CombinationResult, OutputFormat, Report, ReportMeta, Summary, SystemInfo,
    generate_github_summary, generate_json_report,
};

// Re-export the CLI surface
pub use gridjudge_cli::{
    BuildDriver, BuildError, Cli, Commands, ConsoleReporter, EXIT_FATAL, EXIT_TESTS_FAILED,
    GridConfig, MatrixOptions, Reporter, RunPlan, SilentReporter, build_plan, format_human_summary,
    run, run_matrix, run_with_cli,
};
