//! branchdesk - switch configured repositories between git-flow feature branches
//!
//! branchdesk drives the `git` command-line tool: it lists the repositories
//! named in a config file, shows which branch each one is on, checks out
//! feature branches, and clones and prepares repositories that are not
//! checked out yet.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Repository selection and user-level actions
//! - [`core`] - Validated types and configuration
//! - [`git`] - Single interface for all Git invocations
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. Git is only ever invoked with an argument vector, never through a shell
//! 2. Every invocation carries its working directory explicitly
//! 3. Caller-supplied branch names and URLs are validated before use
//! 4. Best-effort passes report every item's outcome

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod ui;
