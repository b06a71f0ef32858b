//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: repository paths must stay
//! inside the repository root, remote URLs and mainline names go through
//! the same strong types the git client uses.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{BranchName, RemoteUrl};

/// Top-level configuration file.
///
/// # Example
///
/// ```toml
/// repository_root = "/srv/checkouts"
/// default_repository = "shop"
///
/// [repositories.shop]
/// repo_path = "shop"
/// git = "git@example.com:acme/shop.git"
///
/// [repositories.admin]
/// repo_path = "admin"
/// git = "git@example.com:acme/admin.git"
/// mainline = "main"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeskConfig {
    /// Directory that holds every configured checkout.
    pub repository_root: PathBuf,

    /// Key selected when none is given on the command line.
    #[serde(default)]
    pub default_repository: Option<String>,

    /// Path to the git executable (default: `git` on `PATH`).
    #[serde(default)]
    pub git_path: Option<PathBuf>,

    /// Configured repositories by key.
    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryEntry>,
}

impl DeskConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repository_root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "repository_root cannot be empty".to_string(),
            ));
        }

        if let Some(git_path) = &self.git_path {
            if git_path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "git_path cannot be empty".to_string(),
                ));
            }
        }

        if let Some(key) = &self.default_repository {
            if !self.repositories.contains_key(key) {
                return Err(ConfigError::InvalidValue(format!(
                    "default_repository '{}' is not a configured repository",
                    key
                )));
            }
        }

        for (key, entry) in &self.repositories {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "repository key cannot be empty".to_string(),
                ));
            }
            entry.validate().map_err(|e| match e {
                ConfigError::InvalidValue(msg) => {
                    ConfigError::InvalidValue(format!("repositories.{}: {}", key, msg))
                }
                other => other,
            })?;
        }

        Ok(())
    }
}

/// One configured repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RepositoryEntry {
    /// Checkout directory, relative to `repository_root`.
    pub repo_path: PathBuf,

    /// Remote the checkout is cloned from.
    pub git: RemoteUrl,

    /// Integration branch (default: `master`).
    #[serde(default)]
    pub mainline: Option<BranchName>,
}

impl RepositoryEntry {
    /// Validate the entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_relative_path(&self.repo_path)
    }
}

fn validate_relative_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue(
            "repo_path cannot be empty".to_string(),
        ));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(ConfigError::InvalidValue(format!(
                    "repo_path cannot contain '..': {}",
                    path.display()
                )))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ConfigError::InvalidValue(format!(
                    "repo_path must be relative to repository_root: {}",
                    path.display()
                )))
            }
        }
    }
    Ok(())
}
