//! status command - Show current branch and selectable features

use super::select_session;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Show the selected repository's current branch and feature choices.
pub fn status(ctx: &Context) -> Result<()> {
    let (_, session) = select_session(ctx)?;
    let overview = session
        .overview()
        .with_context(|| format!("Failed to inspect repository '{}'", session.key()))?;

    if ctx.json {
        output::json(&overview)?;
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    output::print(format!("Repository: {}", overview.repository), verbosity);

    match &overview.current_branch {
        Some(branch) => {
            output::print(format!("On branch: {}", branch), verbosity);
            output::print("Features:", verbosity);
            output::print(output::format_list(&overview.features, "  "), verbosity);
        }
        None => {
            output::print(
                format!(
                    "Not cloned (expected at {}). Run 'branchdesk --repo {} init'.",
                    session.checkout_dir().display(),
                    overview.repository
                ),
                verbosity,
            );
        }
    }
    Ok(())
}
