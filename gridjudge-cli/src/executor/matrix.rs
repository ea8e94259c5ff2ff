//! Matrix Walk
//!
//! Stages each case once, then runs every compiler/level combination
//! against it in order. Progress is reported through the [`Reporter`]
//! hooks as verdicts arrive.

use super::metadata::build_report_meta;
use super::stages::{StageContext, run_combination};
use crate::config::TargetConfig;
use crate::console::Reporter;
use crate::planner::RunPlan;
use anyhow::Context;
use gridjudge_core::Scratch;
use gridjudge_report::{CaseReport, CombinationResult, Report, Summary};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Inputs for one matrix run
pub struct MatrixOptions<'a> {
    /// Scratch directory with the binary and support files staged.
    pub scratch: &'a Scratch,
    /// Staged target binary.
    pub binary: &'a Path,
    /// Directory case identifiers resolve against.
    pub fixtures_root: &'a Path,
    /// Target invocation settings.
    pub target: &'a TargetConfig,
}

/// Run every combination in the plan, reporting progress as it goes.
///
/// Individual combinations never abort the run; only harness-side
/// failures such as unstageable fixtures do.
pub fn run_matrix(
    plan: &RunPlan,
    options: &MatrixOptions<'_>,
    reporter: &mut dyn Reporter,
) -> anyhow::Result<Report> {
    for profile in &plan.profiles {
        profile.validate()?;
    }

    let started = Instant::now();
    let mut summary = Summary {
        total_cases: plan.cases.len(),
        total_combinations: plan.combination_count(),
        ..Default::default()
    };
    let ctx = StageContext {
        scratch: options.scratch,
        binary: options.binary,
        timeout_ns: options.target.timeout_ns,
        extra_args: &options.target.extra_args,
    };

    reporter.on_run_start(plan.cases.len());
    let mut cases = Vec::with_capacity(plan.cases.len());
    for case in &plan.cases {
        reporter.on_case_start(&case.id);
        options
            .scratch
            .stage_case(case, options.fixtures_root)
            .with_context(|| format!("failed to stage fixtures for {}", case.id))?;

        let mut runs = Vec::new();
        for profile in &plan.profiles {
            for &level in &profile.levels {
                let label = profile.label(level);
                debug!("running {}({})", case.id, label);
                let outcome = run_combination(&ctx, profile, level)
                    .with_context(|| format!("{}({})", case.id, label))?;

                if !outcome.verdict.is_accepted() {
                    summary.failures.push(format!("{}({})", case.id, label));
                }
                summary.tally(&outcome.verdict);
                reporter.on_combination(&case.id, &label, &outcome.verdict);
                runs.push(CombinationResult {
                    profile: profile.name.clone(),
                    level,
                    label,
                    verdict: outcome.verdict,
                    metrics: outcome.metrics,
                });
            }
        }
        cases.push(CaseReport {
            id: case.id.clone(),
            runs,
        });
        reporter.on_case_complete(&case.id);
    }

    summary.total_duration_ms = started.elapsed().as_secs_f64() * 1000.0;
    reporter.on_run_complete(&summary);

    Ok(Report {
        meta: build_report_meta(),
        cases,
        summary,
    })
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::planner::build_plan;
    use gridjudge_core::{CompilerProfile, TestCase, Verdict};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    struct RecordingReporter {
        events: Vec<String>,
    }

    impl Reporter for RecordingReporter {
        fn on_run_start(&mut self, cases: usize) {
            self.events.push(format!("start:{cases}"));
        }
        fn on_case_start(&mut self, id: &str) {
            self.events.push(format!("case:{id}"));
        }
        fn on_combination(&mut self, _id: &str, label: &str, verdict: &Verdict) {
            self.events.push(format!("combo:{label}:{}", verdict.code()));
        }
        fn on_case_complete(&mut self, _id: &str) {
            self.events.push("done".to_string());
        }
        fn on_run_complete(&mut self, summary: &Summary) {
            self.events.push(format!("complete:{}", summary.accepted));
        }
    }

    fn write_fixture(root: &Path, id: &str, answer: &str) {
        let dir = root.join("a");
        fs::create_dir_all(&dir).unwrap();
        fs::write(root.join(format!("{id}.c")), "int main() {}\n").unwrap();
        fs::write(root.join(format!("{id}.in")), "1\n").unwrap();
        fs::write(root.join(format!("{id}.ans")), answer).unwrap();
    }

    fn write_sim(scratch: &Scratch) -> PathBuf {
        let path = scratch.file("sim");
        fs::write(&path, "#!/bin/sh\ncp test.in test.out\nprintf 'time: 77\\n'\n").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn test_matrix_run() {
        let root = tempfile::tempdir().unwrap();
        write_fixture(root.path(), "a/pass", "1\n");
        write_fixture(root.path(), "a/fail", "2\n");

        let scratch = Scratch::new().unwrap();
        let sim = write_sim(&scratch);
        let profile = CompilerProfile::new(
            "copy",
            vec!["cp".to_string(), "{src}".to_string(), "{out}".to_string()],
            vec![0],
        );
        let plan = build_plan(
            vec![TestCase::new("a/pass"), TestCase::new("a/fail")],
            vec![profile],
            None,
        );
        let target = TargetConfig {
            binary: "sim".to_string(),
            timeout_ns: 1_000_000_000,
            extra_args: Vec::new(),
        };
        let options = MatrixOptions {
            scratch: &scratch,
            binary: &sim,
            fixtures_root: root.path(),
            target: &target,
        };
        let mut reporter = RecordingReporter { events: Vec::new() };

        let report = run_matrix(&plan, &options, &mut reporter).unwrap();

        assert_eq!(report.summary.total_cases, 2);
        assert_eq!(report.summary.total_combinations, 2);
        assert_eq!(report.summary.accepted, 1);
        assert_eq!(report.summary.wrong_answers, 1);
        assert_eq!(report.summary.failures, ["a/fail(copy-O0)"]);
        assert!(!report.summary.all_passed());

        assert_eq!(report.cases[0].id, "a/fail");
        assert_eq!(report.cases[0].runs[0].verdict, Verdict::WrongAnswer);
        assert_eq!(report.cases[1].id, "a/pass");
        assert_eq!(
            report.cases[1].runs[0].verdict,
            Verdict::Accepted { time_ns: 77 }
        );

        assert_eq!(
            reporter.events,
            [
                "start:2",
                "case:a/fail",
                "combo:copy-O0:WA",
                "done",
                "case:a/pass",
                "combo:copy-O0:AC",
                "done",
                "complete:1",
            ]
        );
    }

    #[test]
    fn test_invalid_profile_aborts() {
        let scratch = Scratch::new().unwrap();
        let sim = write_sim(&scratch);
        let plan = build_plan(
            vec![TestCase::new("a/pass")],
            vec![CompilerProfile::new("empty", Vec::new(), vec![0])],
            None,
        );
        let target = TargetConfig::default();
        let options = MatrixOptions {
            scratch: &scratch,
            binary: &sim,
            fixtures_root: Path::new("."),
            target: &target,
        };
        let mut reporter = RecordingReporter { events: Vec::new() };

        assert!(run_matrix(&plan, &options, &mut reporter).is_err());
        assert!(reporter.events.is_empty());
    }
}
