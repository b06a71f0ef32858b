//! git::error
//!
//! Typed failures for git invocations.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::TypeError;

/// Errors from git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The child process exited non-zero (or was killed by a signal).
    ///
    /// `stderr` is the captured standard error, verbatim.
    #[error("`{command}` failed ({}): {}", display_status(.status), .stderr.trim())]
    CommandFailed {
        /// Display form of the invocation
        command: String,
        /// Exit code, `None` when terminated by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The child process could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Display form of the invocation
        command: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The working directory has no `.git` directory.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// Directory that was checked
        path: PathBuf,
    },

    /// A caller-supplied argument failed validation.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem
        message: String,
    },
}

impl GitError {
    /// Captured standard error when this is a `CommandFailed`.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            GitError::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        GitError::InvalidArgument {
            message: err.to_string(),
        }
    }
}

fn display_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}
