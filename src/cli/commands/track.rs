//! track command - Create local tracking branches for remote branches

use super::require_checkout;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Create tracking branches for every non-mainline remote branch.
///
/// Individual failures are reported, not fatal.
pub fn track(ctx: &Context) -> Result<()> {
    let session = require_checkout(ctx)?;
    let outcomes = session
        .client()
        .checkout_remote()
        .context("Failed to list remote branches")?;

    if ctx.json {
        output::json(&outcomes)?;
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    if outcomes.is_empty() {
        output::print("No remote branches to track", verbosity);
    } else {
        output::print(output::format_outcomes(&outcomes), verbosity);
    }
    Ok(())
}
