//! Verdict classification for one case/compiler/level combination.

use serde::{Deserialize, Serialize};

/// Outcome of a single combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Output matched the golden answer and a run time was reported.
    Accepted {
        /// Simulated run time in nanoseconds.
        time_ns: u64,
    },
    /// The target exited non-zero or failed to start.
    RuntimeError,
    /// Output differed from the golden answer.
    WrongAnswer,
    /// Output matched but the metrics stream was absent or malformed.
    MetricsMissing,
}

impl Verdict {
    /// Whether this combination passed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }

    /// Short judge code, e.g. `WA`.
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Accepted { .. } => "AC",
            Verdict::RuntimeError => "RE",
            Verdict::WrongAnswer => "WA",
            Verdict::MetricsMissing => "IE",
        }
    }

    /// Reported run time, present only on accepted combinations.
    pub fn time_ns(&self) -> Option<u64> {
        match self {
            Verdict::Accepted { time_ns } => Some(*time_ns),
            _ => None,
        }
    }
}

/// Render a nanosecond count with thousands separators, e.g. `1,234,567`.
pub fn format_nanos(ns: u64) -> String {
    let digits = ns.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_nanos() {
        assert_eq!(format_nanos(0), "0");
        assert_eq!(format_nanos(100), "100");
        assert_eq!(format_nanos(1000), "1,000");
        assert_eq!(format_nanos(1234567), "1,234,567");
        assert_eq!(format_nanos(30000000000), "30,000,000,000");
    }

    #[test]
    fn test_codes() {
        assert_eq!(Verdict::Accepted { time_ns: 1 }.code(), "AC");
        assert_eq!(Verdict::RuntimeError.code(), "RE");
        assert_eq!(Verdict::WrongAnswer.code(), "WA");
        assert_eq!(Verdict::MetricsMissing.code(), "IE");
        assert!(Verdict::Accepted { time_ns: 1 }.is_accepted());
        assert!(!Verdict::WrongAnswer.is_accepted());
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Verdict::Accepted { time_ns: 42 }).unwrap();
        assert_eq!(json, r#"{"kind":"accepted","time_ns":42}"#);
        let back: Verdict = serde_json::from_str(r#"{"kind":"wrong_answer"}"#).unwrap();
        assert_eq!(back, Verdict::WrongAnswer);
    }
}
