//! core::types
//!
//! Strong types for values that callers hand to git.
//!
//! # Types
//!
//! - [`BranchName`] - Validated Git branch name
//! - [`RemoteUrl`] - Validated clone URL
//!
//! # Validation
//!
//! Both types are checked at construction time. Every caller-supplied value
//! that ends up in a git argument vector goes through one of them, so a
//! value can never be parsed by git as an option.
//!
//! # Examples
//!
//! ```
//! use branchdesk::core::types::{BranchName, RemoteUrl};
//!
//! let branch = BranchName::new("feature/payments").unwrap();
//! let url = RemoteUrl::new("git@example.com:acme/shop.git").unwrap();
//!
//! assert!(BranchName::new("--upload-pack=evil").is_err());
//! assert!(RemoteUrl::new("-u evil").is_err());
//! # let _ = (branch, url);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid remote url: {0}")]
    InvalidRemoteUrl(String),
}

/// A validated Git branch name.
///
/// Branch names must conform to Git's refname rules (see `git check-ref-format`):
/// - Cannot be empty
/// - Cannot start with `.` or `-`
/// - Cannot end with `.lock` or `/`
/// - Cannot contain `..`, `@{`, `//`, or ASCII control characters
/// - Cannot contain spaces, `~`, `^`, `:`, `\`, `?`, `*`, `[`
/// - Cannot be exactly `@`
///
/// # Example
///
/// ```
/// use branchdesk::core::types::BranchName;
///
/// let name = BranchName::new("feature/my-branch").unwrap();
/// assert_eq!(name.as_str(), "feature/my-branch");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("-f").is_err());
/// assert!(BranchName::new("has space").is_err());
/// assert!(BranchName::new("a&b").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        let reject = |msg: &str| Err(TypeError::InvalidBranchName(msg.to_string()));

        if name.is_empty() {
            return reject("branch name cannot be empty");
        }
        if name == "@" {
            return reject("branch name cannot be '@' (reserved)");
        }
        if name.starts_with('.') {
            return reject("branch name cannot start with '.'");
        }
        if name.starts_with('-') {
            return reject("branch name cannot start with '-'");
        }
        if name.ends_with(".lock") {
            return reject("branch name cannot end with '.lock'");
        }
        if name.ends_with('/') {
            return reject("branch name cannot end with '/'");
        }

        for seq in ["..", "@{", "//"] {
            if name.contains(seq) {
                return Err(TypeError::InvalidBranchName(format!(
                    "branch name cannot contain '{seq}'"
                )));
            }
        }

        const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
        for c in INVALID_CHARS {
            if name.contains(c) {
                return Err(TypeError::InvalidBranchName(format!(
                    "branch name cannot contain '{c}'"
                )));
            }
        }

        if name.chars().any(|c| c.is_ascii_control()) {
            return reject("branch name cannot contain control characters");
        }

        for component in name.split('/') {
            if component.starts_with('.') {
                return reject("path component cannot start with '.'");
            }
            if component.ends_with(".lock") {
                return reject("path component cannot end with '.lock'");
            }
        }

        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated repository URL for `git clone`.
///
/// Accepts anything git understands as a repository location (scp-like
/// `user@host:path`, `https://`, `ssh://`, `file://`, or a local path) as
/// long as it is non-empty, does not start with `-`, and contains no
/// whitespace or control characters.
///
/// # Example
///
/// ```
/// use branchdesk::core::types::RemoteUrl;
///
/// assert!(RemoteUrl::new("https://example.com/acme/shop.git").is_ok());
/// assert!(RemoteUrl::new("/srv/git/shop.git").is_ok());
/// assert!(RemoteUrl::new("").is_err());
/// assert!(RemoteUrl::new("--template=/tmp/x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteUrl(String);

impl RemoteUrl {
    /// Create a new validated remote URL.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRemoteUrl` if the URL is empty, looks like an
    /// option, or contains whitespace/control characters.
    pub fn new(url: impl Into<String>) -> Result<Self, TypeError> {
        let url = url.into();
        if url.is_empty() {
            return Err(TypeError::InvalidRemoteUrl("url cannot be empty".into()));
        }
        if url.starts_with('-') {
            return Err(TypeError::InvalidRemoteUrl(format!(
                "url cannot start with '-': {url}"
            )));
        }
        if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidRemoteUrl(format!(
                "url cannot contain whitespace or control characters: {url:?}"
            )));
        }
        Ok(Self(url))
    }

    /// Get the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RemoteUrl {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RemoteUrl> for String {
    fn from(url: RemoteUrl) -> Self {
        url.0
    }
}

impl AsRef<str> for RemoteUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod branch_name {
        use super::*;

        #[test]
        fn valid_branch_names() {
            assert!(BranchName::new("master").is_ok());
            assert!(BranchName::new("develop").is_ok());
            assert!(BranchName::new("feature/foo").is_ok());
            assert!(BranchName::new("payments").is_ok());
            assert!(BranchName::new("JIRA-123_fix").is_ok());
            assert!(BranchName::new("with.dot").is_ok());
            assert!(BranchName::new("a/b/c/d").is_ok());
        }

        #[test]
        fn empty_name_rejected() {
            assert!(BranchName::new("").is_err());
        }

        #[test]
        fn starts_with_dash_rejected() {
            assert!(BranchName::new("-flag").is_err());
            assert!(BranchName::new("--force").is_err());
        }

        #[test]
        fn starts_with_dot_rejected() {
            assert!(BranchName::new(".hidden").is_err());
            assert!(BranchName::new("foo/.hidden").is_err());
        }

        #[test]
        fn lock_suffix_rejected() {
            assert!(BranchName::new("branch.lock").is_err());
            assert!(BranchName::new("foo/bar.lock").is_err());
        }

        #[test]
        fn bad_sequences_rejected() {
            assert!(BranchName::new("bad..path").is_err());
            assert!(BranchName::new("foo@{bar").is_err());
            assert!(BranchName::new("foo//bar").is_err());
            assert!(BranchName::new("branch/").is_err());
            assert!(BranchName::new("@").is_err());
        }

        #[test]
        fn shell_metacharacters_are_plain_characters() {
            for name in ["a;b", "a&&b", "a|b", "fix-$ref", "`id`", "a>b", "a'b"] {
                assert!(BranchName::new(name).is_ok(), "{name} should be accepted");
            }
        }

        #[test]
        fn control_characters_rejected() {
            assert!(BranchName::new("a\nb").is_err());
            assert!(BranchName::new("a\tb").is_err());
        }

        #[test]
        fn serde_roundtrip_validates() {
            let parsed: Result<BranchName, _> = serde_json::from_str("\"-x\"");
            assert!(parsed.is_err());

            let parsed: BranchName = serde_json::from_str("\"develop\"").unwrap();
            assert_eq!(parsed.as_str(), "develop");
        }
    }

    mod remote_url {
        use super::*;

        #[test]
        fn accepts_common_forms() {
            assert!(RemoteUrl::new("git@github.com:acme/shop.git").is_ok());
            assert!(RemoteUrl::new("ssh://git@host:2222/acme/shop.git").is_ok());
            assert!(RemoteUrl::new("file:///srv/git/shop.git").is_ok());
            assert!(RemoteUrl::new("../shop.git").is_ok());
        }

        #[test]
        fn rejects_option_like_values() {
            assert!(RemoteUrl::new("-c").is_err());
            assert!(RemoteUrl::new("--upload-pack=touch /tmp/x").is_err());
        }

        #[test]
        fn rejects_whitespace() {
            assert!(RemoteUrl::new("https://host/a b.git").is_err());
            assert!(RemoteUrl::new("url\n").is_err());
        }

        #[test]
        fn display_is_verbatim() {
            let url = RemoteUrl::new("https://example.com/x.git").unwrap();
            assert_eq!(url.to_string(), "https://example.com/x.git");
        }
    }
}
