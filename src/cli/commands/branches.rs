//! branches command - List local, remote, or git-flow feature branches

use super::require_checkout;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// List branches of the selected repository.
pub fn branches(ctx: &Context, remote: bool, features: bool, keep_marker: bool) -> Result<()> {
    let session = require_checkout(ctx)?;
    let client = session.client();

    let names = if remote {
        client.list_remote_branches(keep_marker)
    } else if features {
        client.list_features(keep_marker)
    } else {
        client.list_branches(keep_marker)
    }
    .context("Failed to list branches")?;

    if ctx.json {
        output::json(&names)?;
    } else if !names.is_empty() {
        output::print(output::format_list(&names, ""), ctx.verbosity());
    }
    Ok(())
}
