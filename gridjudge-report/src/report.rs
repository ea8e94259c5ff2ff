//! Report Data Structures

use chrono::{DateTime, Utc};
use gridjudge_core::{Metrics, Verdict};
use serde::{Deserialize, Serialize};

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub cases: Vec<CaseReport>,
    pub summary: Summary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub git_commit: Option<String>,
    pub git_branch: Option<String>,
    pub system: SystemInfo,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
}

/// All combination results for one test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case identifier, e.g. `optim/pi`
    pub id: String,
    /// One entry per compiler/level combination, in run order
    pub runs: Vec<CombinationResult>,
}

/// Result of a single case/compiler/level combination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationResult {
    /// Compiler profile name, e.g. `gcc`
    pub profile: String,
    /// Optimization level
    pub level: u8,
    /// Combination label, e.g. `gcc-O1`
    pub label: String,
    /// Judged outcome
    pub verdict: Verdict,
    /// Parsed metrics stream, when one was captured
    pub metrics: Option<Metrics>,
}

/// Run summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_cases: usize,
    pub total_combinations: usize,
    pub accepted: usize,
    pub runtime_errors: usize,
    pub wrong_answers: usize,
    pub metrics_missing: usize,
    pub failures: Vec<String>,
    pub total_duration_ms: f64,
}

impl Summary {
    /// Count one verdict into the totals.
    pub fn tally(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Accepted { .. } => self.accepted += 1,
            Verdict::RuntimeError => self.runtime_errors += 1,
            Verdict::WrongAnswer => self.wrong_answers += 1,
            Verdict::MetricsMissing => self.metrics_missing += 1,
        }
    }

    /// Whether every combination was accepted.
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty() && self.accepted == self.total_combinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally() {
        let mut summary = Summary {
            total_cases: 1,
            total_combinations: 3,
            ..Default::default()
        };
        summary.tally(&Verdict::Accepted { time_ns: 10 });
        summary.tally(&Verdict::WrongAnswer);
        summary.tally(&Verdict::RuntimeError);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.wrong_answers, 1);
        assert_eq!(summary.runtime_errors, 1);
        assert_eq!(summary.metrics_missing, 0);
    }

    #[test]
    fn test_all_passed() {
        let mut summary = Summary {
            total_cases: 1,
            total_combinations: 2,
            ..Default::default()
        };
        summary.tally(&Verdict::Accepted { time_ns: 1 });
        assert!(!summary.all_passed());
        summary.tally(&Verdict::Accepted { time_ns: 2 });
        assert!(summary.all_passed());

        summary.failures.push("optim/pi(gcc-O0)".to_string());
        assert!(!summary.all_passed());
    }
}
