#![warn(missing_docs)]
//! GridJudge CLI Library
//!
//! This module provides the CLI infrastructure for the harness binary.
//! Use `gridjudge::run()` (or `gridjudge_cli::run()`) in your main function
//! to build the target, walk the case/compiler/level matrix, and report
//! verdicts.
//!
//! # Example
//!
//! ```ignore
//! fn main() {
//!     if let Err(err) = gridjudge_cli::run() {
//!         eprintln!("Error: {err:#}");
//!         std::process::exit(gridjudge_cli::EXIT_FATAL);
//!     }
//! }
//! ```

mod build;
mod config;
mod console;
mod executor;
mod planner;

pub use build::{BuildDriver, BuildError};
pub use config::*;
pub use console::{ConsoleReporter, Reporter, SilentReporter, format_human_summary};
pub use executor::{
    MatrixOptions, RunOutcome, StageContext, StageError, build_report_meta, run_combination,
    run_matrix,
};
pub use planner::{RunPlan, build_plan};

use anyhow::Context;
use clap::{Parser, Subcommand};
use gridjudge_core::Scratch;
use gridjudge_report::{OutputFormat, generate_github_summary, generate_json_report};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;

/// Exit code for configuration or build failures.
pub const EXIT_FATAL: i32 = 1;
/// Exit code when at least one combination was not accepted.
pub const EXIT_TESTS_FAILED: i32 = 2;

/// GridJudge CLI arguments
#[derive(Parser, Debug)]
#[command(name = "gridjudge")]
#[command(author, version, about = "GridJudge - correctness and timing matrix for simulators")]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter test cases by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Output format: json, github-summary, human
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to grid.toml (discovered by walking up when not given)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fixture directory override
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Use a prebuilt target binary and skip the build
    #[arg(long)]
    pub binary: Option<PathBuf>,

    /// Keep the scratch directory after the run
    #[arg(long)]
    pub keep_scratch: bool,

    /// Dry run - list selected cases without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List selected cases and combinations
    List,
    /// Run the matrix (default)
    Run,
}

/// Run the GridJudge CLI with the given arguments.
/// This is the main entry point for the harness binary.
///
/// # Returns
/// Returns `Ok(())` on success; the process exits with
/// [`EXIT_TESTS_FAILED`] when combinations were rejected.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let code = run_with_cli(cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Run the GridJudge CLI with pre-parsed arguments, returning the exit code.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<i32> {
    // Initialize logging
    if cli.verbose {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("gridjudge=debug")
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("gridjudge=info")
            .try_init();
    }

    // Load grid.toml configuration (an explicit path wins over discovery)
    let mut config = match &cli.config {
        Some(path) => GridConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GridConfig::discover().unwrap_or_default(),
    };
    if let Some(path) = &cli.fixtures {
        config.fixtures.root = path.to_string_lossy().into_owned();
    }

    let filter = Regex::new(&cli.filter)
        .with_context(|| format!("invalid filter pattern {:?}", cli.filter))?;
    let plan = build_plan(config.cases(), config.profiles(), Some(&filter));

    // Parse output format; the CLI flag wins when explicitly set
    let format_str = if cli.format != "human" {
        cli.format.as_str()
    } else {
        config.output.format.as_str()
    };
    let format: OutputFormat = format_str.parse().unwrap_or(OutputFormat::Human);

    match cli.command {
        Some(Commands::List) => {
            list_cases(&plan);
            Ok(0)
        }
        Some(Commands::Run) => run_cases(&cli, &config, &plan, format),
        None => {
            if cli.dry_run {
                list_cases(&plan);
                Ok(0)
            } else {
                run_cases(&cli, &config, &plan, format)
            }
        }
    }
}

fn list_cases(plan: &RunPlan) {
    println!("GridJudge Plan:");

    let labels: Vec<String> = plan
        .profiles
        .iter()
        .flat_map(|p| p.levels.iter().map(move |&level| p.label(level)))
        .collect();
    let labels = labels.join(", ");
    for case in &plan.cases {
        println!("├── {} [{}]", case.id, labels);
    }

    println!(
        "{} test cases, {} combinations.",
        plan.cases.len(),
        plan.combination_count()
    );
}

fn run_cases(
    cli: &Cli,
    config: &GridConfig,
    plan: &RunPlan,
    format: OutputFormat,
) -> anyhow::Result<i32> {
    if plan.cases.is_empty() {
        println!("No test cases.");
        return Ok(0);
    }

    let scratch = Scratch::new()?;

    // Build the target unless a prebuilt binary was supplied
    let artifact = match &cli.binary {
        Some(path) => path.clone(),
        None => BuildDriver::from_config(&config.build)
            .build()
            .context("Build failed")?,
    };
    let binary = scratch
        .stage_file(&artifact, &config.target.binary)
        .with_context(|| format!("failed to stage target binary {}", artifact.display()))?;

    // Support files are staged once and shared by every combination
    let fixtures_root = PathBuf::from(&config.fixtures.root);
    for name in &config.fixtures.support {
        scratch
            .stage_file(&fixtures_root.join(name), name)
            .with_context(|| format!("failed to stage support file {name}"))?;
    }

    let options = MatrixOptions {
        scratch: &scratch,
        binary: &binary,
        fixtures_root: &fixtures_root,
        target: &config.target,
    };

    let report = if format == OutputFormat::Human {
        let mut reporter = ConsoleReporter::new();
        run_matrix(plan, &options, &mut reporter)?
    } else {
        let mut reporter = SilentReporter;
        run_matrix(plan, &options, &mut reporter)?
    };

    // Generate output; human format goes to a file only when one was asked for
    let output = match format {
        OutputFormat::Json => Some(generate_json_report(&report)?),
        OutputFormat::GithubSummary => Some(generate_github_summary(&report)),
        OutputFormat::Human => cli.output.as_ref().map(|_| format_human_summary(&report)),
    };
    if let Some(output) = output {
        if let Some(ref path) = cli.output {
            let mut file = std::fs::File::create(path)?;
            file.write_all(output.as_bytes())?;
            println!("Report written to: {}", path.display());
        } else {
            print!("{}", output);
        }
    }

    if cli.keep_scratch {
        let path = scratch.keep();
        println!("Scratch directory kept at: {}", path.display());
    }

    if report.summary.all_passed() {
        Ok(0)
    } else {
        Ok(EXIT_TESTS_FAILED)
    }
}
