#![warn(missing_docs)]
//! GridJudge Core - Case Model and Run Primitives
//!
//! Building blocks shared by the harness:
//! - Test case identifiers and fixture layout
//! - Compiler profiles with argv templating
//! - Subprocess invocation with explicit output routing
//! - Per-run scratch directories
//! - Metrics stream parsing and verdict classification

mod case;
mod compiler;
mod metrics;
mod process;
mod scratch;
mod verdict;

pub use case::{ANSWER_EXT, INPUT_EXT, SOURCE_EXT, TestCase, default_cases};
pub use compiler::{
    CompilerError, CompilerProfile, LEVEL_PLACEHOLDER, OUT_PLACEHOLDER, SRC_PLACEHOLDER,
};
pub use metrics::{InstructionCounts, Metrics, MetricsError, parse_metrics, read_metrics};
pub use process::{CommandSpec, OutputSink, ProcessError};
pub use scratch::{
    ANSWER_FILE, ASSEMBLY_FILE, INPUT_FILE, METRICS_FILE, RESULT_FILE, SOURCE_FILE, Scratch,
    ScratchError,
};
pub use verdict::{Verdict, format_nanos};

/// Default per-combination timeout handed to the target, in nanoseconds.
pub const DEFAULT_TIMEOUT_NS: u64 = 30_000_000_000;
