//! git::client
//!
//! Repository client: one method per git subcommand family.
//!
//! # Invariants
//!
//! - Every operation except [`RepoClient::repository_clone`] first checks
//!   that `<work_dir>/.git` exists and fails with [`GitError::NotARepo`]
//!   before spawning anything.
//! - Caller-supplied values (feature names, clone URLs) arrive as, or are
//!   converted into, validated types before they reach an argument vector.
//! - The working directory is passed to every invocation; the process-wide
//!   current directory is never touched.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::parse::{feature_choices, parse_branch_list, tracking_candidates, DEVELOP};
use super::runner::{run_checked, CommandRunner, Invocation, SystemRunner};
use super::GitError;
use crate::core::types::{BranchName, RemoteUrl};

/// Mainline branch used when none is configured.
pub const DEFAULT_MAINLINE: &str = "master";

/// Default remote for `pull_all`.
const ORIGIN: &str = "origin";

/// Result of one tracking checkout in [`RepoClient::checkout_remote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackOutcome {
    /// Remote branch that was checked out with `--track`
    pub branch: String,
    /// `Ok` on success, otherwise git's stderr (or the spawn error)
    #[serde(serialize_with = "serialize_outcome")]
    pub result: Result<(), String>,
}

impl TrackOutcome {
    /// Whether the checkout succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Failure reason, if any.
    pub fn failure(&self) -> Option<&str> {
        self.result.as_ref().err().map(String::as_str)
    }
}

fn serialize_outcome<S: serde::Serializer>(
    result: &Result<(), String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(2))?;
    match result {
        Ok(()) => {
            map.serialize_entry("success", &true)?;
            map.serialize_entry("reason", &Option::<&str>::None)?;
        }
        Err(reason) => {
            map.serialize_entry("success", &false)?;
            map.serialize_entry("reason", &Some(reason.trim()))?;
        }
    }
    map.end()
}

/// A git client bound to one working directory.
///
/// # Example
///
/// ```no_run
/// use branchdesk::git::RepoClient;
///
/// let client = RepoClient::new("/srv/checkouts/shop");
/// println!("on {}", client.current_branch()?);
/// for outcome in client.checkout_remote()? {
///     println!("{} {}", outcome.branch, outcome.is_success());
/// }
/// # Ok::<(), branchdesk::git::GitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RepoClient<R = SystemRunner> {
    work_dir: PathBuf,
    git_path: PathBuf,
    mainline: String,
    runner: R,
}

impl RepoClient<SystemRunner> {
    /// Create a client for `work_dir` using `git` from `PATH`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            git_path: PathBuf::from("git"),
            mainline: DEFAULT_MAINLINE.to_string(),
            runner: SystemRunner,
        }
    }
}

impl<R: CommandRunner> RepoClient<R> {
    /// Replace the command runner.
    pub fn with_runner<T: CommandRunner>(self, runner: T) -> RepoClient<T> {
        RepoClient {
            work_dir: self.work_dir,
            git_path: self.git_path,
            mainline: self.mainline,
            runner,
        }
    }

    /// Use a specific git executable.
    pub fn with_git_path(mut self, git_path: impl Into<PathBuf>) -> Self {
        self.git_path = git_path.into();
        self
    }

    /// Use a mainline other than `master`.
    pub fn with_mainline(mut self, mainline: &BranchName) -> Self {
        self.mainline = mainline.as_str().to_string();
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub fn mainline(&self) -> &str {
        &self.mainline
    }

    /// Whether the working directory contains a `.git` directory.
    pub fn is_repository(&self) -> bool {
        self.work_dir.join(".git").is_dir()
    }

    fn ensure_repository(&self) -> Result<(), GitError> {
        if self.is_repository() {
            Ok(())
        } else {
            Err(GitError::NotARepo {
                path: self.work_dir.clone(),
            })
        }
    }

    fn invocation(&self, args: &[&str]) -> Invocation {
        Invocation::new(&self.git_path, &self.work_dir).args(args.iter().copied())
    }

    /// Run `git <args>` in the repository and return stdout.
    fn git(&self, args: &[&str]) -> Result<String, GitError> {
        self.ensure_repository()?;
        run_checked(&self.runner, &self.invocation(args))
    }

    // =========================================================================
    // Raw-output operations
    // =========================================================================

    /// Check out the mainline, then pull it from `origin`.
    ///
    /// Returns the output of the pull.
    pub fn pull_all(&self) -> Result<String, GitError> {
        self.git(&["checkout", &self.mainline])?;
        self.git(&["pull", ORIGIN, &self.mainline])
    }

    /// Name of the checked-out branch (`HEAD` when detached).
    pub fn current_branch(&self) -> Result<String, GitError> {
        Ok(self
            .git(&["rev-parse", "--abbrev-ref", "HEAD"])?
            .trim()
            .to_string())
    }

    /// Output of `git config -l`.
    pub fn show_config(&self) -> Result<String, GitError> {
        self.git(&["config", "-l"])
    }

    /// Fetch every remote, pruning deleted branches.
    pub fn fetch_all(&self) -> Result<String, GitError> {
        self.git(&["fetch", "--all", "--prune"])
    }

    /// Clone `url` (with submodules) into a new directory under the working
    /// directory. Does not require the working directory to be a repository.
    pub fn repository_clone(&self, url: &RemoteUrl) -> Result<String, GitError> {
        info!(url = %url, dir = %self.work_dir.display(), "cloning");
        run_checked(
            &self.runner,
            &self.invocation(&["clone", "--recursive", url.as_str()]),
        )
    }

    /// Run `git flow init -d` to initialise git-flow with default prefixes.
    pub fn flow_init(&self) -> Result<String, GitError> {
        self.git(&["flow", "init", "-d"])
    }

    // =========================================================================
    // Branch switching
    // =========================================================================

    /// Check out `feature/<name>`, or `develop` itself.
    ///
    /// # Errors
    ///
    /// [`GitError::InvalidArgument`] if `name` is not a valid branch name;
    /// otherwise the checkout's failure.
    pub fn feature_checkout(&self, name: &str) -> Result<String, GitError> {
        let target = feature_branch(name)?;
        info!(branch = %target, "checking out");
        self.git(&["checkout", target.as_str()])
    }

    /// Create local tracking branches for every non-mainline remote branch.
    ///
    /// Failing to list remote branches is an error. Individual checkouts are
    /// best-effort: each one is attempted regardless of earlier failures and
    /// its result is reported in the returned list.
    pub fn checkout_remote(&self) -> Result<Vec<TrackOutcome>, GitError> {
        let listing = self.git(&["branch", "-r"])?;
        let candidates = tracking_candidates(&listing, &self.mainline);
        debug!(count = candidates.len(), "tracking candidates");

        let outcomes = candidates
            .into_iter()
            .map(|branch| {
                let result = self
                    .git(&["checkout", "--track", &branch, "--force"])
                    .map(|_| ())
                    .map_err(|err| match err {
                        GitError::CommandFailed { stderr, .. } => stderr,
                        other => other.to_string(),
                    });
                if let Err(reason) = &result {
                    debug!(%branch, reason = reason.trim(), "tracking checkout failed");
                }
                TrackOutcome { branch, result }
            })
            .collect();

        Ok(outcomes)
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Local feature branches as reported by `git flow feature list`.
    pub fn list_features(&self, keep_marker: bool) -> Result<Vec<String>, GitError> {
        Ok(parse_branch_list(
            &self.git(&["flow", "feature", "list"])?,
            keep_marker,
        ))
    }

    /// Local branches.
    pub fn list_branches(&self, keep_marker: bool) -> Result<Vec<String>, GitError> {
        Ok(parse_branch_list(&self.git(&["branch"])?, keep_marker))
    }

    /// Remote-tracking branches.
    pub fn list_remote_branches(&self, keep_marker: bool) -> Result<Vec<String>, GitError> {
        Ok(parse_branch_list(&self.git(&["branch", "-r"])?, keep_marker))
    }

    /// Feature names available on remotes, followed by `develop`.
    pub fn feature_choices(&self) -> Result<Vec<String>, GitError> {
        Ok(feature_choices(&self.list_remote_branches(false)?))
    }
}

/// Branch checked out for a feature name.
fn feature_branch(name: &str) -> Result<BranchName, GitError> {
    let branch = if name == DEVELOP {
        BranchName::new(DEVELOP)?
    } else {
        // Validate the bare name too so "-x" cannot hide behind the prefix.
        BranchName::new(name)?;
        BranchName::new(format!("feature/{}", name))?
    };
    Ok(branch)
}
