//! init / flow-init commands - Clone and prepare a configured repository

use super::{require_checkout, select_session};
use crate::engine::{Action, ActionReport, Context};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Clone the selected repository, track its remote branches, and run
/// `git flow init -d`.
///
/// The report is printed even when `git flow init -d` fails; the command
/// then exits non-zero and points at `flow-init`.
pub fn init(ctx: &Context) -> Result<()> {
    let (_, session) = select_session(ctx)?;
    let report = session
        .apply(&Action::InitRepository)
        .with_context(|| format!("Failed to initialise repository '{}'", session.key()))?;

    if ctx.json {
        output::json(&report)?;
    } else if let ActionReport::Initialized { tracking, flow, .. } = &report {
        let verbosity = ctx.verbosity();
        output::print(
            format!(
                "Cloned '{}' into {}",
                session.key(),
                session.checkout_dir().display()
            ),
            verbosity,
        );
        if !tracking.is_empty() {
            output::print(output::format_outcomes(tracking), verbosity);
        }
        let failed = tracking.iter().filter(|o| !o.is_success()).count();
        if failed > 0 {
            output::warn(
                format!("{} of {} tracking branches failed", failed, tracking.len()),
                verbosity,
            );
        }
        if flow.is_ok() {
            output::print("Initialised git-flow", verbosity);
        }
    }

    if let ActionReport::Initialized { flow: Err(reason), .. } = &report {
        anyhow::bail!(
            "Repository '{key}' was cloned but git-flow was not initialised: {}\n\
             Run 'branchdesk --repo {key} flow-init' once git-flow is available.",
            reason.trim(),
            key = session.key()
        );
    }
    Ok(())
}

/// Run `git flow init -d` on an existing checkout.
pub fn flow_init(ctx: &Context) -> Result<()> {
    let session = require_checkout(ctx)?;
    let out = session
        .client()
        .flow_init()
        .context("git flow init -d failed")?;

    if ctx.json {
        output::json(&serde_json::json!({ "output": out }))?;
    } else {
        output::raw(&out, ctx.verbosity());
    }
    Ok(())
}
