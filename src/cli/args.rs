//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--repo <key>`: Select a configured repository
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// branchdesk - switch configured repositories between git-flow feature branches
#[derive(Parser, Debug)]
#[command(name = "branchdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: $BRANCHDESK_CONFIG, then the standard locations)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository key to operate on (default: the configured default)
    #[arg(long, global = true, value_name = "KEY")]
    pub repo: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured repositories
    #[command(
        name = "repos",
        long_about = "List the repositories defined in the config file.\n\n\
            The selected repository (from --repo, or the configured default) is \
            marked with an asterisk (*). Repositories that have not been cloned \
            yet are marked as such.",
        after_help = "\
WORKFLOW EXAMPLES:
    # See what is configured
    branchdesk repos

    # Use an explicit config file
    branchdesk --config ./desk.toml repos"
    )]
    Repos,

    /// Show the current branch and selectable features
    #[command(
        name = "status",
        long_about = "Show the selected repository's current branch and the features \
            that can be checked out.\n\n\
            Features are derived from remote-tracking branches named \
            <remote>/feature/<name>; develop is always offered.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Status of the default repository
    branchdesk status

    # Status of a specific repository, as JSON
    branchdesk --repo shop status --json"
    )]
    Status,

    /// Check out a feature branch (or develop)
    #[command(
        name = "checkout",
        long_about = "Check out feature/<FEATURE> in the selected repository.\n\n\
            The special name 'develop' checks out the develop branch itself.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Switch to feature/payments
    branchdesk checkout payments

    # Back to develop
    branchdesk checkout develop"
    )]
    Checkout {
        /// Feature name, without the feature/ prefix
        feature: String,
    },

    /// Clone the selected repository and prepare it for git-flow
    #[command(
        name = "init",
        long_about = "Clone the selected repository into the repository root, create \
            local tracking branches for every remote branch except the mainline, \
            and run 'git flow init -d'.\n\n\
            Tracking branches are best-effort: each one is attempted, and the \
            result for every branch is reported.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Clone a repository that is configured but not checked out yet
    branchdesk --repo admin init"
    )]
    Init,

    /// Run 'git flow init -d' on an existing checkout
    #[command(
        name = "flow-init",
        long_about = "Initialise git-flow with its default branch prefixes in a \
            repository that is already cloned.\n\n\
            Use this when 'init' cloned the repository but could not initialise \
            git-flow, for example because git-flow was not installed yet.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Finish an init that stopped at git-flow
    branchdesk --repo admin flow-init"
    )]
    FlowInit,

    /// List branches
    #[command(name = "branches")]
    Branches {
        /// List remote-tracking branches
        #[arg(short, long, conflicts_with = "features")]
        remote: bool,

        /// List git-flow feature branches
        #[arg(short, long)]
        features: bool,

        /// Keep the '* ' marker on the current branch
        #[arg(long)]
        keep_marker: bool,
    },

    /// Create local tracking branches for remote branches
    #[command(name = "track")]
    Track,

    /// Fetch all remotes and prune deleted branches
    #[command(name = "fetch")]
    Fetch,

    /// Check out the mainline and pull it from origin
    #[command(name = "pull")]
    Pull,

    /// Show the repository's git configuration (git config -l)
    #[command(name = "git-config")]
    GitConfig,

    /// Show the loaded branchdesk configuration
    #[command(name = "config")]
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    branchdesk completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    branchdesk completion zsh >> ~/.zshrc

    # Fish
    branchdesk completion fish > ~/.config/fish/completions/branchdesk.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
