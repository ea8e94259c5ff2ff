//! Target Build Driver
//!
//! Runs the configure and compile commands inside the build directory
//! and locates the produced artifact.

use crate::config::BuildConfig;
use gridjudge_core::{CommandSpec, ProcessError};
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from building the target
#[derive(Debug, Error)]
pub enum BuildError {
    /// The build directory could not be created.
    #[error("failed to create build directory {path}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A build stage has an empty command list.
    #[error("{stage} command is empty")]
    EmptyCommand {
        /// Stage name, `configure` or `compile`.
        stage: &'static str,
    },

    /// A build stage exited with a failure status.
    #[error("{stage} command failed with {status}")]
    StageFailed {
        /// Stage name, `configure` or `compile`.
        stage: &'static str,
        /// Exit status of the failing command.
        status: ExitStatus,
    },

    /// Spawning a build command failed.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// The build finished but the artifact is not where configured.
    #[error("build artifact not found at {path}")]
    MissingArtifact {
        /// Expected artifact path.
        path: PathBuf,
    },
}

/// Drives the configure/compile cycle for the target under test
pub struct BuildDriver {
    directory: PathBuf,
    configure: Vec<String>,
    compile: Vec<String>,
    artifact: PathBuf,
}

impl BuildDriver {
    /// Create a driver from the build section of the configuration.
    pub fn from_config(config: &BuildConfig) -> Self {
        let directory = PathBuf::from(&config.directory);
        let artifact = directory.join(&config.artifact);
        Self {
            directory,
            configure: config.configure.clone(),
            compile: config.compile.clone(),
            artifact,
        }
    }

    /// Run configure and compile, returning the artifact path.
    ///
    /// Build command output is inherited so compiler noise stays visible.
    pub fn build(&self) -> Result<PathBuf, BuildError> {
        std::fs::create_dir_all(&self.directory).map_err(|source| BuildError::CreateDir {
            path: self.directory.clone(),
            source,
        })?;
        info!("building target in {}", self.directory.display());

        self.run_stage("configure", &self.configure)?;
        self.run_stage("compile", &self.compile)?;

        if !self.artifact.exists() {
            return Err(BuildError::MissingArtifact {
                path: self.artifact.clone(),
            });
        }
        Ok(self.artifact.clone())
    }

    fn run_stage(&self, stage: &'static str, command: &[String]) -> Result<(), BuildError> {
        let (program, args) = command
            .split_first()
            .ok_or(BuildError::EmptyCommand { stage })?;
        let spec = CommandSpec::new(program.clone())
            .args(args.iter().cloned())
            .current_dir(&self.directory);
        debug!("{} stage: {}", stage, spec.display());

        let status = spec.run()?;
        if !status.success() {
            return Err(BuildError::StageFailed { stage, status });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config_in(root: &Path, compile: &[&str], artifact: &str) -> BuildConfig {
        BuildConfig {
            directory: root.join("build").to_string_lossy().into_owned(),
            configure: vec!["true".to_string()],
            compile: compile.iter().map(|s| s.to_string()).collect(),
            artifact: artifact.to_string(),
        }
    }

    #[test]
    fn test_build_produces_artifact() {
        let root = tempfile::tempdir().unwrap();
        let config = config_in(root.path(), &["sh", "-c", "echo bin > sim"], "sim");

        let artifact = BuildDriver::from_config(&config).build().unwrap();
        assert!(artifact.exists());
        assert!(artifact.ends_with("build/sim"));
    }

    #[test]
    fn test_failing_stage() {
        let root = tempfile::tempdir().unwrap();
        let config = config_in(root.path(), &["false"], "sim");

        let err = BuildDriver::from_config(&config).build().unwrap_err();
        assert!(matches!(
            err,
            BuildError::StageFailed {
                stage: "compile",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_command() {
        let root = tempfile::tempdir().unwrap();
        let mut config = config_in(root.path(), &["true"], "sim");
        config.configure = Vec::new();

        let err = BuildDriver::from_config(&config).build().unwrap_err();
        assert!(matches!(
            err,
            BuildError::EmptyCommand {
                stage: "configure"
            }
        ));
    }

    #[test]
    fn test_missing_artifact() {
        let root = tempfile::tempdir().unwrap();
        let config = config_in(root.path(), &["true"], "absent");

        let err = BuildDriver::from_config(&config).build().unwrap_err();
        assert!(matches!(err, BuildError::MissingArtifact { .. }));
    }
}
