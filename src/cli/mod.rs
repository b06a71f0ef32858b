//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialise logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that select an [`crate::engine::Session`] and call into it.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.debug);

    let ctx = engine::Context {
        config: cli.config.clone(),
        repo: cli.repo.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `--debug` selects `debug` for this
/// crate and everything else stays at `warn`.
pub fn init_logging(debug: bool) {
    let default = if debug {
        "warn,branchdesk=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // try_init fails when a subscriber is already installed; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
