//! Error and result types for patch runs.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;
use crate::rewrite::ReplacedLine;

/// Failures touching the source script, the temp script, or the lock.
#[derive(Debug, Error)]
pub enum FileAccessError {
  #[error("failed to read build script {}: {source}", path.display())]
  ReadSource { path: PathBuf, source: std::io::Error },

  #[error("failed to write patched script {}: {source}", path.display())]
  WriteTemp { path: PathBuf, source: std::io::Error },

  #[error("failed to remove patched script {}: {source}", path.display())]
  RemoveTemp { path: PathBuf, source: std::io::Error },

  #[error("failed to lock build script {}: {source}", path.display())]
  Lock { path: PathBuf, source: std::io::Error },

  #[error(
    "build script is in use by another archpatch run: {}\n\
     Wait for it to finish, or check that no other build is running.",
    path.display()
  )]
  Locked { path: PathBuf },
}

/// Failures running the patched script.
#[derive(Debug, Error)]
pub enum SubprocessError {
  #[error("failed to spawn `{command}` in {}: {source}", cwd.display())]
  Spawn {
    command: String,
    cwd: PathBuf,
    source: std::io::Error,
  },

  #[error("`{command}` {}", describe_exit(*code))]
  Exited { command: String, code: Option<i32> },
}

fn describe_exit(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("exited with status {}", code),
    None => "was terminated by a signal".to_string(),
  }
}

#[derive(Debug, Error)]
pub enum PatchError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  FileAccess(#[from] FileAccessError),

  #[error(transparent)]
  Subprocess(#[from] SubprocessError),
}

/// Result of a successful patch-and-build run.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
  pub source: PathBuf,
  pub temp_path: PathBuf,
  pub line_count: usize,
  pub replaced: Vec<ReplacedLine>,
  pub status: ExitStatus,
  pub elapsed: Duration,
  /// Files found under the output directory after the build.
  pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  pub path: PathBuf,
  pub size: u64,
}
