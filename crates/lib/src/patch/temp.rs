//! The patched script on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::types::FileAccessError;

/// Owns the patched script file and removes it when dropped.
///
/// Call [`TempScript::remove`] on the success path to surface deletion
/// failures; the `Drop` impl only logs them.
#[derive(Debug)]
pub struct TempScript {
  path: PathBuf,
  armed: bool,
}

impl TempScript {
  /// Write `content` to `path`, truncating any existing file.
  pub fn create(path: &Path, content: &[u8]) -> Result<Self, FileAccessError> {
    fs::write(path, content).map_err(|source| FileAccessError::WriteTemp {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "wrote patched script");
    Ok(Self {
      path: path.to_path_buf(),
      armed: true,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// File name used to invoke the script from its own directory.
  pub fn file_name(&self) -> &str {
    self.path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
  }

  pub fn remove(mut self) -> Result<(), FileAccessError> {
    self.armed = false;
    fs::remove_file(&self.path).map_err(|source| FileAccessError::RemoveTemp {
      path: self.path.clone(),
      source,
    })?;
    debug!(path = %self.path.display(), "removed patched script");
    Ok(())
  }
}

impl Drop for TempScript {
  fn drop(&mut self) {
    if !self.armed {
      return;
    }
    match fs::remove_file(&self.path) {
      Ok(()) => debug!(path = %self.path.display(), "removed patched script"),
      Err(err) => warn!(path = %self.path.display(), error = %err, "failed to remove patched script"),
    }
  }
}
