//! engine
//!
//! Binds a configured repository to a working directory and runs the
//! user-level actions against it.
//!
//! # Flow
//!
//! ```text
//! Config -> Session::select(key) -> Session::apply(Action) -> Session::overview()
//! ```
//!
//! The CLI builds a [`Context`] from its flags, loads the config, selects a
//! [`Session`], and then either applies an [`Action`] or calls one
//! [`crate::git::RepoClient`] operation through [`Session::client`].

pub mod session;

pub use session::{Action, ActionReport, EngineError, Overview, Session};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Config file override.
    pub config: Option<PathBuf>,
    /// Repository key override.
    pub repo: Option<String>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Machine-readable JSON output.
    pub json: bool,
}

impl Context {
    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}
