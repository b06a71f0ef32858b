//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, results are printed as pretty JSON on stdout
//! and the text rendering is skipped entirely.

use std::fmt::Display;

use serde::Serialize;

use crate::git::TrackOutcome;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print raw git output without adding a newline (respects quiet mode).
pub fn raw(text: &str, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet && !text.is_empty() {
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a value as pretty JSON (always shown).
pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format tracking outcomes, one line per branch.
///
/// ```
/// use branchdesk::git::TrackOutcome;
/// use branchdesk::ui::output::format_outcomes;
///
/// let outcomes = vec![
///     TrackOutcome { branch: "origin/feature/a".into(), result: Ok(()) },
///     TrackOutcome { branch: "origin/feature/b".into(), result: Err("fatal: exists\n".into()) },
/// ];
/// assert_eq!(
///     format_outcomes(&outcomes),
///     "  tracked  origin/feature/a\n  failed   origin/feature/b: fatal: exists"
/// );
/// ```
pub fn format_outcomes(outcomes: &[TrackOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(()) => format!("  tracked  {}", outcome.branch),
            Err(reason) => format!("  failed   {}: {}", outcome.branch, first_line(reason)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn first_line(text: &str) -> &str {
    text.trim().lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn format_list_prefixes_each_item() {
        assert_eq!(format_list(&["a", "b"], "- "), "- a\n- b");
        assert_eq!(format_list::<&str>(&[], "- "), "");
    }

    #[test]
    fn outcome_reason_uses_first_line() {
        let outcomes = vec![TrackOutcome {
            branch: "origin/x".to_string(),
            result: Err("\nfatal: one\nhint: two\n".to_string()),
        }];
        assert_eq!(format_outcomes(&outcomes), "  failed   origin/x: fatal: one");
    }
}
