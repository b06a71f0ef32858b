//! fetch / pull commands

use super::require_checkout;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Fetch every remote, pruning deleted branches.
pub fn fetch(ctx: &Context) -> Result<()> {
    let session = require_checkout(ctx)?;
    let out = session.client().fetch_all().context("git fetch failed")?;
    emit(ctx, &out)
}

/// Check out the mainline and pull it from origin.
pub fn pull(ctx: &Context) -> Result<()> {
    let session = require_checkout(ctx)?;
    let out = session.client().pull_all().context("git pull failed")?;
    emit(ctx, &out)
}

fn emit(ctx: &Context, out: &str) -> Result<()> {
    if ctx.json {
        output::json(&serde_json::json!({ "output": out }))?;
    } else {
        output::raw(out, ctx.verbosity());
    }
    Ok(())
}
