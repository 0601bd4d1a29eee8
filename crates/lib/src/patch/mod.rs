//! Patch the build script's architecture flags and run it.
//!
//! A run:
//! - locks and reads the source script
//! - rewrites the `BUILD_ARCHS_DEVICE` / `BUILD_ARCHS_SIMULATOR` assignments
//! - writes the result to a sibling temp script
//! - runs the temp script from its own directory
//! - removes the temp script, on error paths too
//!
//! The process working directory is never changed.

mod artifacts;
mod lock;
mod run;
mod temp;
mod types;

use std::time::Instant;

use tracing::{info, warn};

use crate::config::PatchConfig;
use crate::rewrite::{RewrittenScript, rewrite_script};

pub use artifacts::collect_artifacts;
pub use lock::ScriptLock;
pub use run::run_script;
pub use temp::TempScript;
pub use types::{Artifact, BuildOutcome, FileAccessError, PatchError, SubprocessError};

/// Rewrite the source script without writing or running anything.
pub fn preview(config: &PatchConfig) -> Result<RewrittenScript, PatchError> {
  config.validate()?;

  let source = config.source_path();
  let content = std::fs::read(&source).map_err(|source_err| FileAccessError::ReadSource {
    path: source.clone(),
    source: source_err,
  })?;

  Ok(rewrite_script(&content, &config.overrides(), config.match_mode))
}

/// Patch the source script, run the patched copy, and clean it up.
///
/// Blocks (asynchronously) until the build script exits. The temp script is
/// removed whether or not the build succeeds; only on the success path does a
/// failed removal turn into an error.
pub async fn patch_and_build(config: &PatchConfig) -> Result<BuildOutcome, PatchError> {
  config.validate()?;

  let started = Instant::now();
  let source = config.source_path();

  let mut lock = ScriptLock::acquire(&source)?;
  let original = lock.read_to_end()?;
  let rewritten = rewrite_script(&original, &config.overrides(), config.match_mode);

  info!(
    source = %source.display(),
    lines = rewritten.line_count,
    replaced = rewritten.replaced.len(),
    "patched build script"
  );
  if rewritten.is_unchanged() {
    warn!(source = %source.display(), "no architecture assignments were changed");
  }

  let temp = TempScript::create(&config.temp_path(), &rewritten.content)?;

  let script_dir = config.script_dir();
  let cwd = dunce::canonicalize(&script_dir).unwrap_or(script_dir);
  let status = run_script(&config.shell, temp.file_name(), &cwd).await?;

  let temp_path = temp.path().to_path_buf();
  temp.remove()?;
  drop(lock);

  let elapsed = started.elapsed();
  let artifacts = collect_artifacts(&config.output_dir());
  info!(elapsed_ms = elapsed.as_millis() as u64, artifacts = artifacts.len(), "build finished");

  Ok(BuildOutcome {
    source,
    temp_path,
    line_count: rewritten.line_count,
    replaced: rewritten.replaced,
    status,
    elapsed,
    artifacts,
  })
}
