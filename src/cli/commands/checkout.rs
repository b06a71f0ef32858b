//! checkout command - Check out a feature branch

use super::require_checkout;
use crate::engine::{Action, ActionReport, Context};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Check out `feature/<feature>` (or `develop`) in the selected repository.
pub fn checkout(ctx: &Context, feature: &str) -> Result<()> {
    let session = require_checkout(ctx)?;
    let report = session
        .apply(&Action::ChangeBranch(feature.to_string()))
        .with_context(|| format!("Failed to check out '{}'", feature))?;

    if ctx.json {
        output::json(&report)?;
        return Ok(());
    }

    if let ActionReport::BranchChanged { feature, .. } = &report {
        let branch = session.client().current_branch()?;
        output::print(
            format!("Switched '{}' to {} ({})", session.key(), feature, branch),
            ctx.verbosity(),
        );
    }
    Ok(())
}
