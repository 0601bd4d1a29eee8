//! Listing of the binaries left by the build script.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use super::types::Artifact;

/// Collect regular files under `dir`, sorted by path.
///
/// This is a report, not a check: a missing directory or unreadable entries
/// simply produce fewer artifacts.
pub fn collect_artifacts(dir: &Path) -> Vec<Artifact> {
  if !dir.is_dir() {
    debug!(dir = %dir.display(), "no output directory");
    return Vec::new();
  }

  let mut artifacts: Vec<Artifact> = WalkDir::new(dir)
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| entry.file_type().is_file())
    .map(|entry| Artifact {
      size: entry.metadata().map(|m| m.len()).unwrap_or(0),
      path: entry.into_path(),
    })
    .collect();

  artifacts.sort_by(|a, b| a.path.cmp(&b.path));
  artifacts
}
