//! Shelling out to the system git binary.
//!
//! Every git invocation goes through the [`GitRunner`] trait so tests can
//! feed canned `for-each-ref` output without a repository on disk. The
//! production implementation uses `std::process::Command`, inheriting the
//! user's existing git config and credential store.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::RunnerError;

/// Trait for executing git subcommands.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
pub trait GitRunner {
    /// Run `git <subcommand> <args..>` and return its stdout.
    fn exec<'a>(&self, subcommand: &str, args: &[&'a str]) -> Result<String, RunnerError>;
}

/// Runner that executes the real git binary.
pub struct SystemGit {
    repo_path: Option<PathBuf>,
}

impl SystemGit {
    /// Run git in the current working directory.
    pub fn new() -> Self {
        Self { repo_path: None }
    }

    /// Run git against the repository at `path` (`git -C <path> ..`).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: Some(path.into()),
        }
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for SystemGit {
    fn exec<'a>(&self, subcommand: &str, args: &[&'a str]) -> Result<String, RunnerError> {
        let mut command = Command::new("git");
        if let Some(path) = &self.repo_path {
            command.arg("-C").arg(path);
        }
        command.arg(subcommand).args(args);

        debug!(subcommand, ?args, "Running git");

        let output = command.output().map_err(|source| RunnerError::Spawn {
            subcommand: subcommand.to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RunnerError::NonZeroExit {
                subcommand: subcommand.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        String::from_utf8(output.stdout).map_err(|_| RunnerError::InvalidUtf8 {
            subcommand: subcommand.to_string(),
        })
    }
}
