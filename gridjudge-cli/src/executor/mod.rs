//! Matrix Executor
//!
//! Runs the case/compiler/level matrix sequentially and collects verdicts.
//! Each combination goes through the same staged pipeline inside the
//! per-run scratch directory.
//!
//! ## Pipeline Overview
//!
//! ```text
//! TestCase (from the run plan)
//!       │
//!       ▼
//! ┌─────────────┐
//! │   staging   │  Copy <id>.c/.in/.ans into the scratch dir
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   compile   │  Instantiate the profile template, emit test.s
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   execute   │  Run the target, capture the metrics stream
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │    judge    │  Diff outputs, parse metrics, classify verdict
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`stages`] - Compile/execute/judge pipeline for one combination
//! - [`matrix`] - Sequential walk of the full matrix
//! - [`metadata`] - System metadata collection

mod matrix;
mod metadata;
mod stages;

// Re-export public API
pub use matrix::{MatrixOptions, run_matrix};
pub use metadata::build_report_meta;
pub use stages::{RunOutcome, StageContext, StageError, run_combination};
