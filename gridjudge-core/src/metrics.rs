//! Parsing of the target's performance metrics stream.
//!
//! The target binary reports its counters as plain text on stdout:
//!
//! ```text
//! exit code: 0
//! memory leak: 0
//! time: 1234567
//! # instructions:
//! # simple  = 40 (including unconditional jump)
//! # mul     = 2
//! # mem     = 12 (a.k.a cache miss)
//! ```
//!
//! Only the `time:` line is mandatory. Everything else is parsed
//! opportunistically so older targets with fewer counters still work.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors from reading or parsing a metrics stream.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The captured stream could not be read.
    #[error("failed to read metrics from {path}")]
    Io {
        /// Path of the captured stream.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The stream has no `time:` line at all.
    #[error("metrics stream has no `time:` line")]
    MissingTime,

    /// The first `time:` line does not hold an unsigned integer.
    #[error("malformed `time:` value: {0:?}")]
    BadTime(String),
}

/// Per-category instruction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionCounts {
    /// Plain ALU instructions.
    pub simple: u64,
    /// Multiplications.
    pub mul: u64,
    /// Cache-modelled accesses.
    pub cache: u64,
    /// Branches.
    pub br: u64,
    /// Divisions.
    pub div: u64,
    /// Memory accesses.
    pub mem: u64,
    /// libc I/O calls.
    pub libc_io: u64,
    /// libc memory-management calls.
    pub libc_mem: u64,
}

/// One parsed metrics stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Exit code the simulated program returned, if reported.
    pub exit_code: Option<i32>,
    /// Bytes leaked by the simulated program, if reported.
    pub memory_leak: Option<i64>,
    /// Simulated run time in nanoseconds.
    pub time_ns: u64,
    /// Instruction counters, zeroed when the target omits them.
    #[serde(default)]
    pub instructions: InstructionCounts,
}

/// Parse a metrics stream.
///
/// The first `time:` line wins and must carry an unsigned integer.
/// Unknown counter names are skipped, parenthesized annotations after a
/// counter value are dropped.
pub fn parse_metrics(stream: &str) -> Result<Metrics, MetricsError> {
    let mut exit_code = None;
    let mut memory_leak = None;
    let mut time_ns = None;
    let mut instructions = InstructionCounts::default();

    for line in stream.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("exit code:") {
            if let Ok(value) = rest.trim().parse() {
                exit_code = Some(value);
            }
        } else if let Some(rest) = line.strip_prefix("memory leak:") {
            if let Ok(value) = rest.trim().parse() {
                memory_leak = Some(value);
            }
        } else if let Some(rest) = line.strip_prefix("time:") {
            if time_ns.is_none() {
                let value = rest.trim();
                time_ns = Some(
                    value
                        .parse()
                        .map_err(|_| MetricsError::BadTime(value.to_string()))?,
                );
            }
        } else if let Some((name, value)) = split_counter(line) {
            if let Ok(count) = value.parse() {
                match name {
                    "simple" => instructions.simple = count,
                    "mul" => instructions.mul = count,
                    "cache" => instructions.cache = count,
                    "br" => instructions.br = count,
                    "div" => instructions.div = count,
                    "mem" => instructions.mem = count,
                    "libcIO" => instructions.libc_io = count,
                    "libcMem" => instructions.libc_mem = count,
                    _ => {}
                }
            }
        }
    }

    let time_ns = time_ns.ok_or(MetricsError::MissingTime)?;
    Ok(Metrics {
        exit_code,
        memory_leak,
        time_ns,
        instructions,
    })
}

/// Split one counter line into name and value.
///
/// The target prints counters as `# simple  = 40 (including unconditional
/// jump)`; the hash, the padding and any trailing annotation are dropped.
/// Plain `name: value` pairs are accepted too.
fn split_counter(line: &str) -> Option<(&str, &str)> {
    let line = line.strip_prefix('#').unwrap_or(line);
    let (name, rest) = line.split_once('=').or_else(|| line.split_once(':'))?;
    let value = match rest.find('(') {
        Some(open) => &rest[..open],
        None => rest,
    };
    Some((name.trim(), value.trim()))
}

/// Read and parse a captured metrics file.
pub fn read_metrics(path: &Path) -> Result<Metrics, MetricsError> {
    let stream = fs::read_to_string(path).map_err(|source| MetricsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_metrics(&stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_STREAM: &str = "\nexit code: 0\nmemory leak: 0\ntime: 1234567\n# instructions:\n# simple  = 40 (including unconditional jump)\n# mul     = 2\n# cache   = 0\n# br      = 10\n# div     = 1\n# mem     = 12 (a.k.a cache miss)\n# libcIO  = 3\n# libcMem = 1\n";

    #[test]
    fn test_parse_full_stream() {
        let metrics = parse_metrics(FULL_STREAM).unwrap();
        assert_eq!(metrics.exit_code, Some(0));
        assert_eq!(metrics.memory_leak, Some(0));
        assert_eq!(metrics.time_ns, 1234567);
        let counts = metrics.instructions;
        assert_eq!(counts.simple, 40);
        assert_eq!(counts.mul, 2);
        assert_eq!(counts.cache, 0);
        assert_eq!(counts.br, 10);
        assert_eq!(counts.div, 1);
        assert_eq!(counts.mem, 12);
        assert_eq!(counts.libc_io, 3);
        assert_eq!(counts.libc_mem, 1);
    }

    #[test]
    fn test_time_line_is_mandatory() {
        let err = parse_metrics("exit code: 0\nmemory leak: 0\n").unwrap_err();
        assert!(matches!(err, MetricsError::MissingTime));
    }

    #[test]
    fn test_malformed_time_is_rejected() {
        assert!(matches!(
            parse_metrics("time: -5\n").unwrap_err(),
            MetricsError::BadTime(value) if value == "-5"
        ));
        assert!(matches!(
            parse_metrics("time: fast\n").unwrap_err(),
            MetricsError::BadTime(value) if value == "fast"
        ));
    }

    #[test]
    fn test_first_time_line_wins() {
        let metrics = parse_metrics("time: 10\ntime: 99\n").unwrap();
        assert_eq!(metrics.time_ns, 10);
    }

    #[test]
    fn test_unknown_counters_are_skipped() {
        let metrics = parse_metrics("time: 5\n# vector  = 7\n# simple  = 3\n").unwrap();
        assert_eq!(metrics.time_ns, 5);
        assert_eq!(metrics.instructions.simple, 3);
        assert_eq!(metrics.instructions.mul, 0);
    }

    #[test]
    fn test_colon_counters_accepted() {
        let metrics = parse_metrics("time: 5\n  simple : 3\n  mul: 2\n").unwrap();
        assert_eq!(metrics.instructions.simple, 3);
        assert_eq!(metrics.instructions.mul, 2);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_metrics(&dir.path().join("absent.out")).unwrap_err();
        assert!(matches!(err, MetricsError::Io { .. }));
    }

    #[test]
    fn test_metrics_serde_round_trip() {
        let metrics = parse_metrics(FULL_STREAM).unwrap();
        let json = serde_json::to_string(&metrics).unwrap();
        let back: Metrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metrics);
    }
}
