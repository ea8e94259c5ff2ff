//! Compiler profiles and command templating.
//!
//! A profile is a named argv template parameterized by an optimization
//! level and the source/output paths. Profiles form an open set keyed by
//! name; the orchestrator iterates whatever the configuration provides.

use crate::process::CommandSpec;
use std::path::Path;
use thiserror::Error;

/// Placeholder for the optimization level inside a template argument.
pub const LEVEL_PLACEHOLDER: &str = "{level}";
/// Placeholder for the staged source path.
pub const SRC_PLACEHOLDER: &str = "{src}";
/// Placeholder for the assembly output path.
pub const OUT_PLACEHOLDER: &str = "{out}";

/// Errors from compiler profile validation.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// The template has no program element.
    #[error("compiler profile `{0}` has an empty command template")]
    EmptyTemplate(String),

    /// The profile declares no optimization levels.
    #[error("compiler profile `{0}` declares no optimization levels")]
    NoLevels(String),
}

/// A named compiler: an argv command template plus its level set.
#[derive(Debug, Clone)]
pub struct CompilerProfile {
    /// Profile name, e.g. `gcc`.
    pub name: String,
    /// Argv template; `{level}`, `{src}` and `{out}` are substituted.
    pub template: Vec<String>,
    /// Optimization levels to run, e.g. `[0, 1, 2]`.
    pub levels: Vec<u8>,
}

impl CompilerProfile {
    /// Create a profile from its parts.
    pub fn new(name: impl Into<String>, template: Vec<String>, levels: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            template,
            levels,
        }
    }

    /// The stock RISC-V cross compiler profile.
    pub fn gcc() -> Self {
        Self::new(
            "gcc",
            vec![
                "riscv32-unknown-linux-gnu-gcc".to_string(),
                "-S".to_string(),
                "-fno-section-anchors".to_string(),
                "-O{level}".to_string(),
                "-o".to_string(),
                OUT_PLACEHOLDER.to_string(),
                SRC_PLACEHOLDER.to_string(),
            ],
            vec![0, 1, 2],
        )
    }

    /// Check the profile is runnable.
    pub fn validate(&self) -> Result<(), CompilerError> {
        if self.template.is_empty() {
            return Err(CompilerError::EmptyTemplate(self.name.clone()));
        }
        if self.levels.is_empty() {
            return Err(CompilerError::NoLevels(self.name.clone()));
        }
        Ok(())
    }

    /// Label for one combination, e.g. `gcc-O1`.
    pub fn label(&self, level: u8) -> String {
        format!("{}-O{}", self.name, level)
    }

    /// Instantiate the template for a level and concrete paths.
    ///
    /// Substitution is textual within each argument, so compound forms
    /// like `-O{level}` work.
    pub fn command(&self, level: u8, src: &Path, out: &Path) -> Result<CommandSpec, CompilerError> {
        let level_str = level.to_string();
        let src_str = src.to_string_lossy();
        let out_str = out.to_string_lossy();

        let mut parts = self.template.iter().map(|arg| {
            arg.replace(LEVEL_PLACEHOLDER, &level_str)
                .replace(SRC_PLACEHOLDER, &src_str)
                .replace(OUT_PLACEHOLDER, &out_str)
        });
        let program = parts
            .next()
            .ok_or_else(|| CompilerError::EmptyTemplate(self.name.clone()))?;
        Ok(CommandSpec::new(program).args(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let gcc = CompilerProfile::gcc();
        assert_eq!(gcc.label(0), "gcc-O0");
        assert_eq!(gcc.label(2), "gcc-O2");
    }

    #[test]
    fn test_command_substitution() {
        let gcc = CompilerProfile::gcc();
        let spec = gcc
            .command(1, Path::new("/scratch/test.c"), Path::new("/scratch/test.s"))
            .unwrap();
        assert_eq!(spec.program(), "riscv32-unknown-linux-gnu-gcc");
        assert_eq!(
            spec.argv(),
            [
                "-S",
                "-fno-section-anchors",
                "-O1",
                "-o",
                "/scratch/test.s",
                "/scratch/test.c",
            ]
        );
    }

    #[test]
    fn test_validate_empty_template() {
        let profile = CompilerProfile::new("broken", vec![], vec![0]);
        assert!(matches!(
            profile.validate(),
            Err(CompilerError::EmptyTemplate(name)) if name == "broken"
        ));
    }

    #[test]
    fn test_validate_no_levels() {
        let profile = CompilerProfile::new("flat", vec!["cc".to_string()], vec![]);
        assert!(matches!(
            profile.validate(),
            Err(CompilerError::NoLevels(name)) if name == "flat"
        ));
    }
}
