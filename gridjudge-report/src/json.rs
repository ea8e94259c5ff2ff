//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Serializes the full run report into machine-readable JSON format.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CaseReport, CombinationResult, ReportMeta, Summary, SystemInfo};
    use chrono::Utc;
    use gridjudge_core::Verdict;

    fn sample_report() -> Report {
        let mut summary = Summary {
            total_cases: 1,
            total_combinations: 1,
            ..Default::default()
        };
        summary.tally(&Verdict::Accepted { time_ns: 1234567 });
        Report {
            meta: ReportMeta {
                version: "0.1.0".to_string(),
                timestamp: Utc::now(),
                git_commit: None,
                git_branch: None,
                system: SystemInfo {
                    os: "linux".to_string(),
                    arch: "x86_64".to_string(),
                    cpu: "Unknown".to_string(),
                    cpu_cores: 8,
                },
            },
            cases: vec![CaseReport {
                id: "optim/pi".to_string(),
                runs: vec![CombinationResult {
                    profile: "gcc".to_string(),
                    level: 1,
                    label: "gcc-O1".to_string(),
                    verdict: Verdict::Accepted { time_ns: 1234567 },
                    metrics: None,
                }],
            }],
            summary,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let json = generate_json_report(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cases.len(), 1);
        assert_eq!(back.cases[0].runs[0].label, "gcc-O1");
        assert_eq!(back.summary.accepted, 1);
    }

    #[test]
    fn test_json_verdict_shape() {
        let json = generate_json_report(&sample_report()).unwrap();
        assert!(json.contains(r#""kind": "accepted""#));
        assert!(json.contains(r#""time_ns": 1234567"#));
    }
}
