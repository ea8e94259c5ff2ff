//! Synchronous external process execution.
//!
//! Every collaborator (build system, compiler, target binary) is invoked
//! through [`CommandSpec`]: a program plus argument vector with explicit
//! stream routing. Nothing is ever passed through a shell. A non-zero
//! exit status is a normal result for the caller to interpret; only
//! spawn and stream plumbing failures are errors.

use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Errors from launching or waiting on an external command.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be spawned at all.
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A capture file could not be created.
    #[error("failed to open `{path}` for capture: {source}")]
    Capture {
        /// Capture destination.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed.
    #[error("failed to wait for `{program}`: {source}")]
    Wait {
        /// Program that was being waited on.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Destination for a child's output stream.
#[derive(Debug, Clone, Default)]
pub enum OutputSink {
    /// Inherit the harness's own stream.
    #[default]
    Inherit,
    /// Discard the stream.
    Null,
    /// Capture the stream to a file, truncating it first.
    File(PathBuf),
}

/// One external command: program, arguments, working directory and
/// stream routing.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    stdout: OutputSink,
    stderr: OutputSink,
}

impl CommandSpec {
    /// Start building a command for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            stdout: OutputSink::Inherit,
            stderr: OutputSink::Inherit,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the command from `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Route the child's stdout.
    pub fn stdout(mut self, sink: OutputSink) -> Self {
        self.stdout = sink;
        self
    }

    /// Route the child's stderr.
    pub fn stderr(mut self, sink: OutputSink) -> Self {
        self.stderr = sink;
        self
    }

    /// The program this command launches.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument vector.
    pub fn argv(&self) -> &[String] {
        &self.args
    }

    /// Render the command line for diagnostics.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute synchronously and return the exit status.
    ///
    /// Stdin is closed; no collaborator reads from the harness. A
    /// non-zero status comes back as `Ok`.
    pub fn run(&self) -> Result<ExitStatus, ProcessError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).stdin(Stdio::null());
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command.stdout(stdio_for(&self.stdout)?);
        command.stderr(stdio_for(&self.stderr)?);

        let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        child.wait().map_err(|source| ProcessError::Wait {
            program: self.program.clone(),
            source,
        })
    }
}

fn stdio_for(sink: &OutputSink) -> Result<Stdio, ProcessError> {
    Ok(match sink {
        OutputSink::Inherit => Stdio::inherit(),
        OutputSink::Null => Stdio::null(),
        OutputSink::File(path) => {
            let file = File::create(path).map_err(|source| ProcessError::Capture {
                path: path.clone(),
                source,
            })?;
            Stdio::from(file)
        }
    })
}
