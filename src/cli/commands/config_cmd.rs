//! config / git-config commands

use super::{load_config, require_checkout};
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Show the loaded configuration and where it came from.
pub fn show(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;

    if ctx.json {
        output::json(&serde_json::json!({
            "source": config.source(),
            "settings": &config.settings,
        }))?;
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    output::print(format!("# {}", config.source().display()), verbosity);
    let text = toml::to_string_pretty(&config.settings).context("Failed to render config")?;
    output::raw(&text, verbosity);
    Ok(())
}

/// Print `git config -l` for the selected repository.
pub fn git_config(ctx: &Context) -> Result<()> {
    let session = require_checkout(ctx)?;
    let out = session
        .client()
        .show_config()
        .context("git config -l failed")?;

    if ctx.json {
        let entries: serde_json::Map<String, serde_json::Value> = out
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        output::json(&entries)?;
    } else {
        output::raw(&out, ctx.verbosity());
    }
    Ok(())
}
