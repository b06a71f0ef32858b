//! End-to-end tests for the branchdesk binary.
//!
//! Each test writes a config file into a temporary directory and runs the
//! binary against it with `--config`, so the user's own configuration is
//! never read.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Temporary desk: a bare origin, a repository root, and a config file
/// with the repositories `shop` (default) and `admin`.
struct Desk {
    dir: TempDir,
}

impl Desk {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let seed = dir.child("seed");
        seed.create_dir_all().unwrap();

        run_git(seed.path(), &["init"]);
        run_git(seed.path(), &["config", "user.email", "test@example.com"]);
        run_git(seed.path(), &["config", "user.name", "Test User"]);
        run_git(seed.path(), &["symbolic-ref", "HEAD", "refs/heads/master"]);
        seed.child("README.md").write_str("# Shop\n").unwrap();
        run_git(seed.path(), &["add", "README.md"]);
        run_git(seed.path(), &["commit", "-m", "Initial commit"]);
        run_git(seed.path(), &["branch", "develop"]);
        run_git(seed.path(), &["branch", "feature/login"]);

        let origin = dir.child("shop.git");
        run_git(dir.path(), &["init", "--bare", "shop.git"]);
        run_git(origin.path(), &["symbolic-ref", "HEAD", "refs/heads/master"]);
        run_git(seed.path(), &["push", origin.path().to_str().unwrap(), "--all"]);

        dir.child("root").create_dir_all().unwrap();
        let desk = Self { dir };
        desk.write_config(&format!(
            r#"
repository_root = "{root}"
default_repository = "shop"

[repositories.shop]
repo_path = "shop"
git = "{origin}"

[repositories.admin]
repo_path = "admin"
git = "{origin}"
mainline = "main"
"#,
            root = desk.root().display(),
            origin = origin.path().display(),
        ));
        desk
    }

    fn root(&self) -> std::path::PathBuf {
        self.dir.child("root").path().to_path_buf()
    }

    fn config_path(&self) -> std::path::PathBuf {
        self.dir.child("config.toml").path().to_path_buf()
    }

    fn write_config(&self, contents: &str) {
        self.dir.child("config.toml").write_str(contents).unwrap();
    }

    /// Clone `shop` into the repository root the way `init` would.
    fn clone_shop(&self) {
        let origin = self.dir.child("shop.git");
        run_git(
            &self.root(),
            &["clone", origin.path().to_str().unwrap(), "shop"],
        );
    }

    /// Route git through a wrapper that behaves as if git-flow were not
    /// installed.
    #[cfg(unix)]
    fn without_git_flow(&self) {
        use std::os::unix::fs::PermissionsExt;

        let wrapper = self.dir.child("git-no-flow");
        wrapper
            .write_str(
                "#!/bin/sh\n\
                 if [ \"$1\" = flow ]; then\n\
                 echo \"git: 'flow' is not a git command.\" >&2\n\
                 exit 1\n\
                 fi\n\
                 exec git \"$@\"\n",
            )
            .unwrap();
        std::fs::set_permissions(wrapper.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = std::fs::read_to_string(self.config_path()).unwrap();
        self.write_config(&format!(
            "git_path = \"{}\"\n{}",
            wrapper.path().display(),
            config
        ));
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("branchdesk").unwrap();
        cmd.env_remove("BRANCHDESK_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

mod config {
    use super::*;

    #[test]
    fn repos_marks_default_and_uncloned() {
        let desk = Desk::new();
        desk.cmd()
            .arg("repos")
            .assert()
            .success()
            .stdout(predicate::str::contains("* shop (not cloned)"))
            .stdout(predicate::str::contains("  admin (not cloned)"));
    }

    #[test]
    fn repos_respects_repo_flag() {
        let desk = Desk::new();
        desk.clone_shop();
        desk.cmd()
            .args(["--repo", "admin", "repos"])
            .assert()
            .success()
            .stdout(predicate::str::contains("* admin (not cloned)"))
            .stdout(predicate::str::contains("  shop\n"));
    }

    #[test]
    fn repos_as_json() {
        let desk = Desk::new();
        let output = desk.cmd().args(["repos", "--json"]).output().unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let keys: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["admin", "shop"]);
        assert_eq!(value[1]["selected"], true);
    }

    #[test]
    fn config_shows_source_and_settings() {
        let desk = Desk::new();
        desk.cmd()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"))
            .stdout(predicate::str::contains("[repositories.shop]"))
            .stdout(predicate::str::contains("mainline = \"main\""));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let desk = Desk::new();
        Command::cargo_bin("branchdesk")
            .unwrap()
            .args(["--config"])
            .arg(desk.dir.child("absent.toml").path())
            .arg("repos")
            .assert()
            .failure()
            .stderr(predicate::str::contains("config file not found"));
    }

    #[test]
    fn config_from_environment() {
        let desk = Desk::new();
        Command::cargo_bin("branchdesk")
            .unwrap()
            .env("BRANCHDESK_CONFIG", desk.config_path())
            .arg("repos")
            .assert()
            .success()
            .stdout(predicate::str::contains("shop"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let desk = Desk::new();
        desk.write_config("repository_root = \"/tmp\"\nrepo_root = \"/tmp\"\n");
        desk.cmd()
            .arg("repos")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse config file"));
    }

    #[test]
    fn unknown_repository_lists_configured_keys() {
        let desk = Desk::new();
        desk.cmd()
            .args(["--repo", "nope", "status"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown repository 'nope'"))
            .stderr(predicate::str::contains("admin, shop"));
    }
}

mod repository {
    use super::*;

    #[test]
    fn status_without_checkout() {
        let desk = Desk::new();
        desk.cmd()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Repository: shop"))
            .stdout(predicate::str::contains("Not cloned"));
    }

    #[test]
    fn status_lists_features() {
        let desk = Desk::new();
        desk.clone_shop();
        desk.cmd()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("On branch: master"))
            .stdout(predicate::str::contains("  login\n  develop"));
    }

    #[test]
    fn status_as_json() {
        let desk = Desk::new();
        desk.clone_shop();
        let output = desk.cmd().args(["status", "--json"]).output().unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["repository"], "shop");
        assert_eq!(value["has_repository"], true);
        assert_eq!(value["current_branch"], "master");
        assert_eq!(value["features"], serde_json::json!(["login", "develop"]));
    }

    #[test]
    fn checkout_feature_then_develop() {
        let desk = Desk::new();
        desk.clone_shop();
        desk.cmd()
            .args(["checkout", "login"])
            .assert()
            .success()
            .stdout(predicate::str::contains("feature/login"));

        desk.cmd()
            .args(["status", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"current_branch\": \"login\""));

        desk.cmd().args(["checkout", "develop"]).assert().success();
    }

    #[test]
    fn checkout_rejects_invalid_refname() {
        let desk = Desk::new();
        desk.clone_shop();
        desk.cmd()
            .args(["checkout", "a..b"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to check out 'a..b'"))
            .stderr(predicate::str::contains("cannot contain '..'"));
    }

    #[test]
    fn checkout_without_clone_suggests_init() {
        let desk = Desk::new();
        desk.cmd()
            .args(["checkout", "login"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("init"));
    }

    #[test]
    fn branches_listings() {
        let desk = Desk::new();
        desk.clone_shop();
        desk.cmd()
            .args(["branches"])
            .assert()
            .success()
            .stdout("master\n");
        desk.cmd()
            .args(["branches", "--keep-marker"])
            .assert()
            .success()
            .stdout("* master\n");
        desk.cmd()
            .args(["branches", "-r"])
            .assert()
            .success()
            .stdout(predicate::str::contains("origin/feature/login"));
    }

    #[test]
    fn track_reports_each_branch() {
        let desk = Desk::new();
        desk.clone_shop();
        desk.cmd()
            .arg("track")
            .assert()
            .success()
            .stdout(predicate::str::contains("tracked  origin/develop"))
            .stdout(predicate::str::contains("tracked  origin/feature/login"));
    }

    #[test]
    fn init_refuses_existing_checkout() {
        let desk = Desk::new();
        desk.clone_shop();
        desk.cmd()
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already cloned"));
    }

    #[cfg(unix)]
    #[test]
    fn init_reports_tracking_when_git_flow_is_missing() {
        let desk = Desk::new();
        desk.without_git_flow();
        desk.cmd()
            .arg("init")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Cloned 'shop'"))
            .stdout(predicate::str::contains("tracked  origin/develop"))
            .stdout(predicate::str::contains("tracked  origin/feature/login"))
            .stderr(predicate::str::contains("git-flow was not initialised"))
            .stderr(predicate::str::contains("branchdesk --repo shop flow-init"));

        assert!(desk.root().join("shop").join(".git").is_dir());
        desk.cmd()
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already cloned"));
    }

    #[cfg(unix)]
    #[test]
    fn init_as_json_includes_flow_failure() {
        let desk = Desk::new();
        desk.without_git_flow();
        let output = desk.cmd().args(["init", "--json"]).output().unwrap();
        assert!(!output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["action"], "initialized");
        assert_eq!(value["flow"]["success"], false);
        assert!(value["tracking"]
            .as_array()
            .unwrap()
            .iter()
            .any(|o| o["branch"] == "origin/develop" && o["success"] == true));
    }

    #[test]
    fn flow_init_requires_checkout() {
        let desk = Desk::new();
        desk.cmd()
            .arg("flow-init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not cloned"));
    }

    #[test]
    fn quiet_suppresses_output() {
        let desk = Desk::new();
        desk.clone_shop();
        desk.cmd()
            .args(["-q", "fetch"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn completion_generates_script() {
    Command::cargo_bin("branchdesk")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("branchdesk"));
}
