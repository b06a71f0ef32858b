//! git::parse
//!
//! Text post-processing for `git branch` style listings.
//!
//! Listings are split on newlines and each line trimmed. The current-branch
//! marker `* ` is stripped from the start of a line unless the caller asks
//! to keep it. Empty lines are dropped. Order is git's own listing order.

use std::sync::OnceLock;

use regex::Regex;

/// Branch offered in addition to the discovered features.
pub const DEVELOP: &str = "develop";

const CURRENT_MARKER: &str = "* ";

fn after_first_space() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" .*$").expect("static regex"))
}

fn feature_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^.*feature/").expect("static regex"))
}

fn remote_feature() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^.*/feature").expect("static regex"))
}

fn strip_marker(line: &str) -> &str {
    line.strip_prefix(CURRENT_MARKER).unwrap_or(line)
}

/// Parse a branch listing into names.
///
/// # Example
///
/// ```
/// use branchdesk::git::parse::parse_branch_list;
///
/// let text = "  feature-a\n* feature-b\n\n  feature-c  ";
/// assert_eq!(parse_branch_list(text, false), vec!["feature-a", "feature-b", "feature-c"]);
/// assert_eq!(parse_branch_list(text, true), vec!["feature-a", "* feature-b", "feature-c"]);
/// ```
pub fn parse_branch_list(text: &str, keep_marker: bool) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .map(|line| if keep_marker { line } else { strip_marker(line) })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remote branches worth creating local tracking branches for.
///
/// Each line is trimmed and unmarked, then cut at its first space (which
/// turns `origin/HEAD -> origin/master` into `origin/HEAD`). Entries that are
/// empty or contain `mainline` anywhere are dropped.
///
/// # Example
///
/// ```
/// use branchdesk::git::parse::tracking_candidates;
///
/// let text = "origin/master\norigin/feature/x\n  origin/feature/y -> origin/feature/y\n";
/// assert_eq!(
///     tracking_candidates(text, "master"),
///     vec!["origin/feature/x", "origin/feature/y"]
/// );
/// ```
pub fn tracking_candidates(text: &str, mainline: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| strip_marker(line.trim()))
        .map(|line| after_first_space().replace(line, "").into_owned())
        .filter(|branch| !branch.is_empty() && !branch.contains(mainline))
        .collect()
}

/// Feature name of a branch: everything after the last `feature/`.
///
/// Names without a `feature/` segment are returned unchanged.
///
/// ```
/// use branchdesk::git::parse::feature_from_branch_name;
///
/// assert_eq!(feature_from_branch_name("origin/feature/payments"), "payments");
/// assert_eq!(feature_from_branch_name("feature/payments"), "payments");
/// assert_eq!(feature_from_branch_name("develop"), "develop");
/// ```
pub fn feature_from_branch_name(branch: &str) -> String {
    feature_prefix().replace(branch, "").into_owned()
}

/// Features selectable for checkout, derived from remote branch names.
///
/// Keeps remote entries with a `/feature` segment, maps them through
/// [`feature_from_branch_name`], and always appends [`DEVELOP`].
///
/// ```
/// use branchdesk::git::parse::feature_choices;
///
/// let remotes = vec![
///     "origin/HEAD -> origin/master".to_string(),
///     "origin/feature/login".to_string(),
///     "origin/master".to_string(),
/// ];
/// assert_eq!(feature_choices(&remotes), vec!["login", "develop"]);
/// ```
pub fn feature_choices<S: AsRef<str>>(remote_branches: &[S]) -> Vec<String> {
    remote_branches
        .iter()
        .map(AsRef::as_ref)
        .filter(|branch| remote_feature().is_match(branch))
        .map(feature_from_branch_name)
        .chain(std::iter::once(DEVELOP.to_string()))
        .collect()
}
