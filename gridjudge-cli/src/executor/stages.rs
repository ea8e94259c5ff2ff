//! Per-Combination Pipeline
//!
//! Compiles the staged source, runs the target, and judges the result.
//! Compiler and target failures are verdicts, not errors; only problems
//! on the harness side abort the run.

use gridjudge_core::{
    CommandSpec, CompilerError, CompilerProfile, Metrics, MetricsError, OutputSink, Scratch,
    Verdict, read_metrics,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that abort the run instead of producing a verdict
#[derive(Debug, Error)]
pub enum StageError {
    /// The compiler profile could not be instantiated.
    #[error(transparent)]
    Compiler(#[from] CompilerError),

    /// A harness-owned file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Shared inputs for every combination in a run
pub struct StageContext<'a> {
    /// Scratch directory the run works in.
    pub scratch: &'a Scratch,
    /// Staged target binary.
    pub binary: &'a Path,
    /// Timeout handed to the target, in nanoseconds.
    pub timeout_ns: u64,
    /// Extra arguments appended to every target invocation.
    pub extra_args: &'a [String],
}

/// Verdict plus captured metrics for one combination
#[derive(Debug)]
pub struct RunOutcome {
    /// Judged outcome.
    pub verdict: Verdict,
    /// Parsed metrics stream, present when one was captured.
    pub metrics: Option<Metrics>,
}

impl RunOutcome {
    fn verdict_only(verdict: Verdict) -> Self {
        Self {
            verdict,
            metrics: None,
        }
    }
}

/// Run one case/compiler/level combination.
///
/// The case fixtures must already be staged in the scratch directory.
pub fn run_combination(
    ctx: &StageContext<'_>,
    profile: &CompilerProfile,
    level: u8,
) -> Result<RunOutcome, StageError> {
    compile(ctx, profile, level)?;

    if !execute_target(ctx) {
        return Ok(RunOutcome::verdict_only(Verdict::RuntimeError));
    }

    if !outputs_match(&ctx.scratch.result_file(), &ctx.scratch.answer_file())? {
        return Ok(RunOutcome::verdict_only(Verdict::WrongAnswer));
    }

    match read_metrics(&ctx.scratch.metrics_file()) {
        Ok(metrics) => Ok(RunOutcome {
            verdict: Verdict::Accepted {
                time_ns: metrics.time_ns,
            },
            metrics: Some(metrics),
        }),
        Err(MetricsError::Io { path, source }) => Err(StageError::Read { path, source }),
        Err(err) => {
            debug!("metrics stream rejected: {err}");
            Ok(RunOutcome::verdict_only(Verdict::MetricsMissing))
        }
    }
}

/// Instantiate the profile template and emit the assembly.
///
/// A failed compile is not an error here: the target then finds no
/// assembly and the combination surfaces as a runtime error.
fn compile(ctx: &StageContext<'_>, profile: &CompilerProfile, level: u8) -> Result<(), StageError> {
    let assembly = ctx.scratch.assembly_file();
    // A leftover test.s from the previous level would mask a failed compile.
    remove_stale(&assembly);

    let spec = profile.command(level, &ctx.scratch.source_file(), &assembly)?;
    match spec.run() {
        Ok(status) if !status.success() => {
            debug!("compiler exited with {status}");
        }
        Ok(_) => {}
        Err(err) => {
            warn!("compiler failed to start: {err}");
        }
    }
    Ok(())
}

/// Run the target in the scratch directory, capturing its metrics stream.
fn execute_target(ctx: &StageContext<'_>) -> bool {
    remove_stale(&ctx.scratch.result_file());

    let spec = CommandSpec::new(ctx.binary.to_string_lossy().into_owned())
        .arg("--oj-mode")
        .arg("--enable-cache")
        .arg(format!("--timeout={}", ctx.timeout_ns))
        .args(ctx.extra_args.iter().cloned())
        .current_dir(ctx.scratch.path())
        .stdout(OutputSink::File(ctx.scratch.metrics_file()))
        .stderr(OutputSink::Null);

    match spec.run() {
        Ok(status) => status.success(),
        Err(err) => {
            warn!("target failed to start: {err}");
            false
        }
    }
}

/// Byte-exact comparison of the target's output against the golden answer.
fn outputs_match(result: &Path, answer: &Path) -> Result<bool, StageError> {
    let produced = match fs::read(result) {
        Ok(bytes) => bytes,
        // The target owns this file; an unreadable one counts as no output.
        Err(_) => return Ok(false),
    };
    let expected = fs::read(answer).map_err(|source| StageError::Read {
        path: answer.to_path_buf(),
        source,
    })?;
    Ok(produced == expected)
}

fn remove_stale(path: &Path) {
    let _ = fs::remove_file(path);
}
