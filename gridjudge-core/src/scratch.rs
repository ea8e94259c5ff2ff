//! Per-run scratch directories.
//!
//! Every run works inside its own temporary directory so concurrent
//! invocations never clobber each other's staged fixtures or outputs.
//! The directory is removed on drop unless [`Scratch::keep`] is called.

use crate::case::TestCase;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

/// Staged source file name inside the scratch directory.
pub const SOURCE_FILE: &str = "test.c";
/// Staged input file name.
pub const INPUT_FILE: &str = "test.in";
/// Staged golden answer file name.
pub const ANSWER_FILE: &str = "test.ans";
/// Assembly emitted by the compiler under test.
pub const ASSEMBLY_FILE: &str = "test.s";
/// Output produced by the target binary.
pub const RESULT_FILE: &str = "test.out";
/// Captured metrics stream from the target binary.
pub const METRICS_FILE: &str = "metrics.out";

/// Errors from scratch directory management.
#[derive(Debug, Error)]
pub enum ScratchError {
    /// The temporary directory could not be created.
    #[error("failed to create scratch directory")]
    Create(#[source] io::Error),

    /// A fixture that should be staged does not exist.
    #[error("missing file to stage: {0}")]
    Missing(PathBuf),

    /// Copying a file into the scratch directory failed.
    #[error("failed to stage {from} as {to}")]
    Stage {
        /// Source path of the copy.
        from: PathBuf,
        /// Destination path inside the scratch directory.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// An isolated working directory for one harness run.
#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    /// Create a fresh scratch directory under the system temp root.
    pub fn new() -> Result<Self, ScratchError> {
        let dir = tempfile::Builder::new()
            .prefix("gridjudge-")
            .tempdir()
            .map_err(ScratchError::Create)?;
        Ok(Self { dir })
    }

    /// Path of the scratch directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the staged source file.
    pub fn source_file(&self) -> PathBuf {
        self.file(SOURCE_FILE)
    }

    /// Path of the staged input file.
    pub fn input_file(&self) -> PathBuf {
        self.file(INPUT_FILE)
    }

    /// Path of the staged golden answer.
    pub fn answer_file(&self) -> PathBuf {
        self.file(ANSWER_FILE)
    }

    /// Path of the compiler's assembly output.
    pub fn assembly_file(&self) -> PathBuf {
        self.file(ASSEMBLY_FILE)
    }

    /// Path of the target's program output.
    pub fn result_file(&self) -> PathBuf {
        self.file(RESULT_FILE)
    }

    /// Path of the captured metrics stream.
    pub fn metrics_file(&self) -> PathBuf {
        self.file(METRICS_FILE)
    }

    /// Path of an arbitrary file inside the scratch directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Stage one case's fixtures under their fixed scratch names.
    pub fn stage_case(&self, case: &TestCase, fixtures_root: &Path) -> Result<(), ScratchError> {
        self.stage(&case.source(fixtures_root), &self.source_file())?;
        self.stage(&case.input(fixtures_root), &self.input_file())?;
        self.stage(&case.answer(fixtures_root), &self.answer_file())?;
        Ok(())
    }

    /// Copy a support file into the scratch directory under `name`.
    ///
    /// Permission bits are preserved, so staged binaries stay runnable.
    pub fn stage_file(&self, from: &Path, name: &str) -> Result<PathBuf, ScratchError> {
        let to = self.file(name);
        self.stage(from, &to)?;
        Ok(to)
    }

    fn stage(&self, from: &Path, to: &Path) -> Result<(), ScratchError> {
        if !from.exists() {
            return Err(ScratchError::Missing(from.to_path_buf()));
        }
        fs::copy(from, to).map_err(|source| ScratchError::Stage {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Persist the scratch directory and return its path.
    ///
    /// The caller becomes responsible for removing it.
    #[allow(deprecated)]
    pub fn keep(self) -> PathBuf {
        self.dir.into_path()
    }
}
