//! git::mock
//!
//! Scripted command runner for deterministic testing.
//!
//! # Design
//!
//! [`ScriptedRunner`] implements [`CommandRunner`] without spawning
//! anything. Responses are registered per argument vector; every
//! invocation is recorded so tests can assert on exactly what would have
//! been executed.
//!
//! When several responses are queued for the same arguments they are
//! returned in order, and the last one keeps being returned after that.
//! Unscripted invocations fail with exit status 127.
//!
//! # Example
//!
//! ```
//! use branchdesk::git::mock::ScriptedRunner;
//! use branchdesk::git::{CommandOutput, RepoClient};
//! # let dir = tempfile::TempDir::new().unwrap();
//! # std::fs::create_dir(dir.path().join(".git")).unwrap();
//!
//! let runner = ScriptedRunner::new();
//! runner.respond(&["rev-parse", "--abbrev-ref", "HEAD"], CommandOutput::ok("develop\n"));
//!
//! let client = RepoClient::new(dir.path()).with_runner(runner.clone());
//! assert_eq!(client.current_branch().unwrap(), "develop");
//! assert_eq!(runner.calls(), vec![vec!["rev-parse", "--abbrev-ref", "HEAD"]]);
//! ```

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

use super::runner::{CommandOutput, CommandRunner, Invocation};

/// Scripted runner for tests.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<Mutex<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    responses: HashMap<Vec<String>, VecDeque<Scripted>>,
    invocations: Vec<Invocation>,
}

#[derive(Debug, Clone)]
enum Scripted {
    Output(CommandOutput),
    SpawnError(io::ErrorKind),
}

impl ScriptedRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `output` for invocations whose arguments equal `args`.
    pub fn respond(&self, args: &[&str], output: CommandOutput) {
        self.push(args, Scripted::Output(output));
    }

    /// Queue a spawn failure for invocations whose arguments equal `args`.
    pub fn fail_to_spawn(&self, args: &[&str], kind: io::ErrorKind) {
        self.push(args, Scripted::SpawnError(kind));
    }

    fn push(&self, args: &[&str], scripted: Scripted) {
        let key = args.iter().map(|a| a.to_string()).collect();
        let mut inner = self.inner.lock().unwrap();
        inner.responses.entry(key).or_default().push_back(scripted);
    }

    /// Every recorded invocation, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.inner.lock().unwrap().invocations.clone()
    }

    /// Argument vectors of every recorded invocation, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.invocations()
            .iter()
            .map(Invocation::args_lossy)
            .collect()
    }

    /// Clear recorded invocations, keeping scripted responses.
    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().invocations.clear();
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        let mut inner = self.inner.lock().unwrap();
        inner.invocations.push(invocation.clone());

        let key = invocation.args_lossy();
        let scripted = match inner.responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match scripted {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::SpawnError(kind)) => {
                Err(io::Error::new(kind, "scripted spawn failure"))
            }
            None => Ok(CommandOutput::failed(
                127,
                format!("unscripted invocation: {}", invocation),
            )),
        }
    }
}
