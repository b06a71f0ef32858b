//! repos command - List configured repositories

use super::load_config;
use crate::engine::Context;
use crate::ui::output;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RepoLine {
    key: String,
    selected: bool,
    cloned: bool,
    path: String,
    git: String,
}

/// List configured repositories, marking the selected one.
pub fn repos(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    let selected = ctx.repo.as_deref().or_else(|| config.default_key());

    let lines: Vec<RepoLine> = config
        .settings
        .repositories
        .iter()
        .map(|(key, entry)| {
            let path = config.repository_root().join(&entry.repo_path);
            RepoLine {
                key: key.clone(),
                selected: selected == Some(key.as_str()),
                cloned: path.join(".git").is_dir(),
                path: path.display().to_string(),
                git: entry.git.to_string(),
            }
        })
        .collect();

    if ctx.json {
        output::json(&lines)?;
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    if lines.is_empty() {
        output::print(
            format!("No repositories configured in {}", config.source().display()),
            verbosity,
        );
    }
    for line in &lines {
        let marker = if line.selected { "*" } else { " " };
        let state = if line.cloned { "" } else { " (not cloned)" };
        output::print(format!("{} {}{}", marker, line.key, state), verbosity);
    }
    Ok(())
}
