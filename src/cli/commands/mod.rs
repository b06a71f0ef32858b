//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the config and selects a session
//! 2. Calls the session or its git client
//! 3. Formats and displays output (text or JSON)
//!
//! Handlers never build git arguments themselves.

mod branches;
mod checkout;
mod completion;
mod config_cmd;
mod init;
mod remote;
mod repos;
mod status;
mod track;

// Re-export command functions for testing and direct invocation
pub use branches::branches;
pub use checkout::checkout;
pub use completion::completion;
pub use config_cmd::{git_config, show as config_show};
pub use init::{flow_init, init};
pub use remote::{fetch, pull};
pub use repos::repos;
pub use status::status;
pub use track::track;

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::engine::{Context, Session};
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Repos => repos::repos(ctx),
        Command::Status => status::status(ctx),
        Command::Checkout { feature } => checkout::checkout(ctx, &feature),
        Command::Init => init::init(ctx),
        Command::FlowInit => init::flow_init(ctx),
        Command::Branches {
            remote,
            features,
            keep_marker,
        } => branches::branches(ctx, remote, features, keep_marker),
        Command::Track => track::track(ctx),
        Command::Fetch => remote::fetch(ctx),
        Command::Pull => remote::pull(ctx),
        Command::GitConfig => config_cmd::git_config(ctx),
        Command::Config => config_cmd::show(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load the config named by the context (or the default locations).
pub(crate) fn load_config(ctx: &Context) -> Result<Config> {
    Config::load(ctx.config.as_deref()).context("Failed to load config")
}

/// Load the config and select the requested repository.
pub(crate) fn select_session(ctx: &Context) -> Result<(Config, Session)> {
    let config = load_config(ctx)?;
    let session = Session::select(&config, ctx.repo.as_deref())
        .context("Failed to select repository")?;
    Ok((config, session))
}

/// Select the requested repository and require its checkout to exist.
pub(crate) fn require_checkout(ctx: &Context) -> Result<Session> {
    let (_, session) = select_session(ctx)?;
    if !session.has_repository() {
        anyhow::bail!(
            "Repository '{}' is not cloned at {}. Run 'branchdesk --repo {} init' first.",
            session.key(),
            session.checkout_dir().display(),
            session.key()
        );
    }
    Ok(session)
}
