//! Configuration loading from grid.toml
//!
//! Harness configuration can be specified in a `grid.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use gridjudge_core::{CompilerProfile, DEFAULT_TIMEOUT_NS, TestCase, default_cases};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// GridJudge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Target build configuration
    #[serde(default)]
    pub build: BuildConfig,
    /// Target invocation configuration
    #[serde(default)]
    pub target: TargetConfig,
    /// Fixture tree configuration
    #[serde(default)]
    pub fixtures: FixturesConfig,
    /// Compiler profiles, keyed by name
    #[serde(default = "default_compilers")]
    pub compilers: BTreeMap<String, CompilerConfig>,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            target: TargetConfig::default(),
            fixtures: FixturesConfig::default(),
            compilers: default_compilers(),
            output: OutputConfig::default(),
        }
    }
}

/// Build configuration for the target under test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build directory, created if absent
    #[serde(default = "default_build_directory")]
    pub directory: String,
    /// Configure command run inside the build directory
    #[serde(default = "default_configure")]
    pub configure: Vec<String>,
    /// Compile command run inside the build directory
    #[serde(default = "default_compile")]
    pub compile: Vec<String>,
    /// Built artifact, relative to the build directory
    #[serde(default = "default_artifact")]
    pub artifact: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            directory: default_build_directory(),
            configure: default_configure(),
            compile: default_compile(),
            artifact: default_artifact(),
        }
    }
}

fn default_build_directory() -> String {
    "build".to_string()
}
fn default_configure() -> Vec<String> {
    vec!["cmake".to_string(), "..".to_string()]
}
fn default_compile() -> Vec<String> {
    vec!["make".to_string()]
}
fn default_artifact() -> String {
    "src/ravel".to_string()
}

/// Invocation configuration for the target binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Name the binary is staged under inside the scratch directory
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Per-combination timeout handed to the target, in nanoseconds
    #[serde(default = "default_timeout_ns")]
    pub timeout_ns: u64,
    /// Extra arguments appended to every target invocation
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            timeout_ns: default_timeout_ns(),
            extra_args: Vec::new(),
        }
    }
}

fn default_binary() -> String {
    "ravel".to_string()
}
fn default_timeout_ns() -> u64 {
    DEFAULT_TIMEOUT_NS
}

/// Fixture tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturesConfig {
    /// Directory that case identifiers resolve against
    #[serde(default = "default_fixtures_root")]
    pub root: String,
    /// Explicit case list; the stock registry is used when absent
    #[serde(default)]
    pub cases: Option<Vec<String>>,
    /// Support files staged next to the binary, e.g. runtime stubs
    #[serde(default = "default_support")]
    pub support: Vec<String>,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            root: default_fixtures_root(),
            cases: None,
            support: default_support(),
        }
    }
}

fn default_fixtures_root() -> String {
    ".".to_string()
}
fn default_support() -> Vec<String> {
    vec!["builtin.s".to_string()]
}

/// One compiler profile entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Argv template; `{level}`, `{src}` and `{out}` are substituted
    pub template: Vec<String>,
    /// Optimization levels to run
    #[serde(default = "default_levels")]
    pub levels: Vec<u8>,
}

fn default_levels() -> Vec<u8> {
    vec![0, 1, 2]
}

fn default_compilers() -> BTreeMap<String, CompilerConfig> {
    let gcc = CompilerProfile::gcc();
    BTreeMap::from([(
        gcc.name.clone(),
        CompilerConfig {
            template: gcc.template,
            levels: gcc.levels,
        },
    )])
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "github"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl GridConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("grid.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# GridJudge Configuration

[build]
# Build directory, created if absent
directory = "build"
# Configure command run inside the build directory
configure = ["cmake", ".."]
# Compile command run inside the build directory
compile = ["make"]
# Built artifact, relative to the build directory
artifact = "src/ravel"

[target]
# Name the binary is staged under inside the scratch directory
binary = "ravel"
# Per-combination timeout in nanoseconds
timeout_ns = 30000000000
# Extra arguments for every invocation (uncomment to enable)
# extra_args = ["--keep-debug-info"]

[fixtures]
# Directory that case identifiers resolve against
root = "."
# Support files staged next to the binary
support = ["builtin.s"]
# Explicit case list (uncomment to override the stock registry)
# cases = ["optim/pi", "optim/sha_1"]

[compilers.gcc]
template = [
    "riscv32-unknown-linux-gnu-gcc",
    "-S",
    "-fno-section-anchors",
    "-O{level}",
    "-o",
    "{out}",
    "{src}",
]
levels = [0, 1, 2]

[output]
# Default output format: human, json, github
format = "human"
"#
        .to_string()
    }

    /// Resolved case list, sorted and deduplicated
    pub fn cases(&self) -> Vec<TestCase> {
        match &self.fixtures.cases {
            Some(ids) => {
                let mut cases: Vec<TestCase> =
                    ids.iter().map(|id| TestCase::new(id.clone())).collect();
                cases.sort();
                cases.dedup();
                cases
            }
            None => default_cases(),
        }
    }

    /// Compiler profiles in name order
    pub fn profiles(&self) -> Vec<CompilerProfile> {
        self.compilers
            .iter()
            .map(|(name, compiler)| {
                CompilerProfile::new(
                    name.clone(),
                    compiler.template.clone(),
                    compiler.levels.clone(),
                )
            })
            .collect()
    }
}
