//! git::runner
//!
//! Synchronous child-process execution.
//!
//! This is the only place in the crate that spawns processes. Commands are
//! argument vectors executed directly (no shell), with the working
//! directory passed per invocation.
//!
//! # Failure semantics
//!
//! A zero exit status is success even when stderr is non-empty (git writes
//! progress there). Any other status fails with
//! [`GitError::CommandFailed`] carrying stderr verbatim. There is no
//! timeout and no retry: [`CommandRunner::run`] blocks until the child
//! exits.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::GitError;

/// A single process invocation: program, arguments, working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: PathBuf,
}

impl Invocation {
    /// Create an invocation of `program` in `cwd` with no arguments.
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn arg_list(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as lossily-decoded strings.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code, `None` when terminated by a signal
    pub status: Option<i32>,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            status: Some(0),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            status: Some(status),
        }
    }

    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Executes invocations.
///
/// Implemented by [`SystemRunner`] for real processes and by
/// [`crate::git::mock::ScriptedRunner`] for tests.
pub trait CommandRunner {
    /// Run the invocation to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an I/O error only when the process cannot be spawned or
    /// waited on. A non-zero exit is reported through `CommandOutput::status`.
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        (**self).run(invocation)
    }
}

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        let output = Command::new(invocation.program())
            .args(invocation.arg_list())
            .current_dir(invocation.cwd())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        })
    }
}

/// Run an invocation and return its stdout, failing on non-zero exit.
///
/// # Errors
///
/// - [`GitError::Spawn`] if the process could not be started
/// - [`GitError::CommandFailed`] if it exited non-zero
pub fn run_checked<R: CommandRunner + ?Sized>(
    runner: &R,
    invocation: &Invocation,
) -> Result<String, GitError> {
    let command = invocation.to_string();
    debug!(%command, cwd = %invocation.cwd().display(), "running");

    let output = runner.run(invocation).map_err(|source| GitError::Spawn {
        command: command.clone(),
        source,
    })?;

    debug!(%command, status = ?output.status, "finished");

    if output.success() {
        Ok(output.stdout)
    } else {
        Err(GitError::CommandFailed {
            command,
            status: output.status,
            stderr: output.stderr,
        })
    }
}
