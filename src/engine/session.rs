//! engine::session
//!
//! Repository selection and the change-branch / init-repository actions.
//!
//! # Selection
//!
//! The checkout directory of a repository is
//! `repository_root/<repo_path>`. When that directory has no `.git`, the
//! session works in `repository_root` instead: that is where a clone of the
//! repository lands, and only [`Action::InitRepository`] makes sense there.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::{Config, RepositoryEntry};
use crate::git::parse::feature_from_branch_name;
use crate::git::{CommandRunner, GitError, RepoClient, SystemRunner, TrackOutcome};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no repositories configured")]
    NoRepositories,

    #[error("unknown repository '{key}' (configured: {})", .available.join(", "))]
    UnknownRepository { key: String, available: Vec<String> },

    #[error("repository '{key}' is already cloned at {}", .path.display())]
    AlreadyCloned { key: String, path: PathBuf },

    #[error(transparent)]
    Git(#[from] GitError),
}

/// User-level action applied to the selected repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Check out a feature (or `develop`).
    ChangeBranch(String),
    /// Clone the repository, create tracking branches, initialise git-flow.
    InitRepository,
    /// Do nothing.
    None,
}

/// What an applied action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionReport {
    None,
    BranchChanged {
        feature: String,
        output: String,
    },
    Initialized {
        clone_output: String,
        tracking: Vec<TrackOutcome>,
        /// Output of `git flow init -d`, or why it failed. The clone and the
        /// tracking branches stay in place either way.
        #[serde(serialize_with = "serialize_flow")]
        flow: Result<String, String>,
    },
}

fn serialize_flow<S: serde::Serializer>(
    flow: &Result<String, String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(3))?;
    match flow {
        Ok(output) => {
            map.serialize_entry("success", &true)?;
            map.serialize_entry("output", output)?;
            map.serialize_entry("reason", &Option::<&str>::None)?;
        }
        Err(reason) => {
            map.serialize_entry("success", &false)?;
            map.serialize_entry("output", "")?;
            map.serialize_entry("reason", &Some(reason.trim()))?;
        }
    }
    map.end()
}

/// View of the selected repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    /// Selected repository key
    pub repository: String,
    /// Directory the session works in
    pub work_dir: PathBuf,
    /// Whether the checkout exists
    pub has_repository: bool,
    /// Current branch as a feature name (`None` without a checkout)
    pub current_branch: Option<String>,
    /// Selectable features, ending with `develop` (empty without a checkout)
    pub features: Vec<String>,
}

/// A configured repository bound to its working directory.
#[derive(Debug, Clone)]
pub struct Session<R = SystemRunner> {
    key: String,
    entry: RepositoryEntry,
    root: PathBuf,
    checkout_dir: PathBuf,
    git_path: PathBuf,
    runner: R,
}

impl Session<SystemRunner> {
    /// Select `key` (or the default repository) from `config`.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoRepositories`] when nothing is configured,
    /// [`EngineError::UnknownRepository`] for a key that is not configured.
    pub fn select(config: &Config, key: Option<&str>) -> Result<Self, EngineError> {
        let key = match key {
            Some(key) => key,
            None => config.default_key().ok_or(EngineError::NoRepositories)?,
        };
        let entry = config
            .repository(key)
            .ok_or_else(|| EngineError::UnknownRepository {
                key: key.to_string(),
                available: config.keys().map(str::to_string).collect(),
            })?;

        let root = config.repository_root().to_path_buf();
        let checkout_dir = root.join(&entry.repo_path);
        debug!(%key, dir = %checkout_dir.display(), "selected repository");

        Ok(Self {
            key: key.to_string(),
            entry: entry.clone(),
            root,
            checkout_dir,
            git_path: config.git_path().to_path_buf(),
            runner: SystemRunner,
        })
    }
}

impl<R: CommandRunner + Clone> Session<R> {
    /// Replace the command runner used by every client this session builds.
    pub fn with_runner<T: CommandRunner + Clone>(self, runner: T) -> Session<T> {
        Session {
            key: self.key,
            entry: self.entry,
            root: self.root,
            checkout_dir: self.checkout_dir,
            git_path: self.git_path,
            runner,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Directory of the checkout, whether or not it exists yet.
    pub fn checkout_dir(&self) -> &Path {
        &self.checkout_dir
    }

    /// Whether the checkout directory contains `.git`.
    pub fn has_repository(&self) -> bool {
        self.checkout_dir.join(".git").is_dir()
    }

    /// Directory the session works in: the checkout, or the root without one.
    pub fn work_dir(&self) -> &Path {
        if self.has_repository() {
            &self.checkout_dir
        } else {
            &self.root
        }
    }

    fn client_at(&self, dir: &Path) -> RepoClient<R> {
        let client = RepoClient::new(dir)
            .with_git_path(&self.git_path)
            .with_runner(self.runner.clone());
        match &self.entry.mainline {
            Some(mainline) => client.with_mainline(mainline),
            None => client,
        }
    }

    /// Client bound to [`Session::work_dir`].
    pub fn client(&self) -> RepoClient<R> {
        self.client_at(self.work_dir())
    }

    /// Apply an action.
    ///
    /// # Errors
    ///
    /// Git failures propagate. `InitRepository` fails with
    /// [`EngineError::AlreadyCloned`] when the checkout exists, and with
    /// [`GitError::NotARepo`] when the clone did not land in the configured
    /// checkout directory. A failing `git flow init -d` is not an error: it
    /// is reported in [`ActionReport::Initialized`] next to the tracking
    /// outcomes.
    pub fn apply(&self, action: &Action) -> Result<ActionReport, EngineError> {
        match action {
            Action::None => Ok(ActionReport::None),
            Action::ChangeBranch(feature) => {
                let output = self.client().feature_checkout(feature)?;
                Ok(ActionReport::BranchChanged {
                    feature: feature.clone(),
                    output,
                })
            }
            Action::InitRepository => self.init_repository(),
        }
    }

    fn init_repository(&self) -> Result<ActionReport, EngineError> {
        if self.has_repository() {
            return Err(EngineError::AlreadyCloned {
                key: self.key.clone(),
                path: self.checkout_dir.clone(),
            });
        }

        info!(key = %self.key, root = %self.root.display(), "initialising repository");
        let clone_output = self.client_at(&self.root).repository_clone(&self.entry.git)?;

        let checkout = self.client_at(&self.checkout_dir);
        let tracking = checkout.checkout_remote()?;
        let flow = checkout.flow_init().map_err(|err| err.to_string());
        if let Err(reason) = &flow {
            debug!(key = %self.key, %reason, "git flow init failed");
        }

        Ok(ActionReport::Initialized {
            clone_output,
            tracking,
            flow,
        })
    }

    /// Current branch and selectable features of the selected repository.
    pub fn overview(&self) -> Result<Overview, EngineError> {
        if !self.has_repository() {
            return Ok(Overview {
                repository: self.key.clone(),
                work_dir: self.work_dir().to_path_buf(),
                has_repository: false,
                current_branch: None,
                features: Vec::new(),
            });
        }

        let client = self.client();
        let current = client.current_branch()?;
        let features = client.feature_choices()?;

        Ok(Overview {
            repository: self.key.clone(),
            work_dir: self.checkout_dir.clone(),
            has_repository: true,
            current_branch: Some(feature_from_branch_name(&current)),
            features,
        })
    }
}
