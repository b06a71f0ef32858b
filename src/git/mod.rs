//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. Every git invocation is an
//! argument vector handed to a [`CommandRunner`]; no other module spawns
//! processes or builds git arguments.
//!
//! - [`runner`] - process execution and exit-status handling
//! - [`client`] - [`RepoClient`], one method per git subcommand family
//! - [`parse`] - post-processing of branch listings
//! - [`mock`] - [`mock::ScriptedRunner`] for deterministic tests
//!
//! # Example
//!
//! ```no_run
//! use branchdesk::git::RepoClient;
//!
//! let client = RepoClient::new("/srv/checkouts/shop");
//! client.fetch_all()?;
//! for feature in client.feature_choices()? {
//!     println!("{feature}");
//! }
//! # Ok::<(), branchdesk::git::GitError>(())
//! ```

pub mod client;
mod error;
pub mod mock;
pub mod parse;
pub mod runner;

pub use client::{RepoClient, TrackOutcome, DEFAULT_MAINLINE};
pub use error::GitError;
pub use runner::{run_checked, CommandOutput, CommandRunner, Invocation, SystemRunner};
