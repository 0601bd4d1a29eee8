//! Advisory locking of the source build script.
//!
//! The lock is held on the source script itself for the whole run, so two runs
//! against the same script cannot race on the shared temp file. No extra lock
//! file is left in the library checkout.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::FileAccessError;

pub struct ScriptLock {
  file: File,
  path: PathBuf,
}

impl ScriptLock {
  /// Open `path` and take a non-blocking exclusive lock on it.
  ///
  /// Fails with `FileAccessError::Locked` if another process holds it.
  pub fn acquire(path: &Path) -> Result<Self, FileAccessError> {
    let file = File::open(path).map_err(|source| FileAccessError::ReadSource {
      path: path.to_path_buf(),
      source,
    })?;

    if let Err(err) = try_lock_exclusive(&file) {
      if err.kind() == io::ErrorKind::WouldBlock {
        return Err(FileAccessError::Locked {
          path: path.to_path_buf(),
        });
      }
      return Err(FileAccessError::Lock {
        path: path.to_path_buf(),
        source: err,
      });
    }

    debug!(path = %path.display(), "locked build script");
    Ok(Self {
      file,
      path: path.to_path_buf(),
    })
  }

  /// Read the whole script through the locked handle.
  pub fn read_to_end(&mut self) -> Result<Vec<u8>, FileAccessError> {
    let mut content = Vec::new();
    self
      .file
      .read_to_end(&mut content)
      .map_err(|source| FileAccessError::ReadSource {
        path: self.path.clone(),
        source,
      })?;
    Ok(content)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> io::Result<()> {
  use rustix::fs::{FlockOperation, flock};
  use std::os::unix::io::AsFd;

  flock(file.as_fd(), FlockOperation::NonBlockingLockExclusive)
    .map_err(|e| io::Error::from_raw_os_error(e.raw_os_error()))
}

#[cfg(windows)]
fn try_lock_exclusive(file: &File) -> io::Result<()> {
  use std::os::windows::io::AsRawHandle;
  use windows_sys::Win32::Foundation::{ERROR_LOCK_VIOLATION, HANDLE};
  use windows_sys::Win32::Storage::FileSystem::{LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY, LockFileEx};

  let handle = file.as_raw_handle() as HANDLE;

  // SAFETY: OVERLAPPED is a plain data struct that is valid when zero-initialized,
  // and the handle stays open for the duration of the call.
  let result = unsafe {
    let mut overlapped = std::mem::zeroed();
    LockFileEx(
      handle,
      LOCKFILE_FAIL_IMMEDIATELY | LOCKFILE_EXCLUSIVE_LOCK,
      0,
      1,
      0,
      &mut overlapped,
    )
  };

  if result != 0 {
    return Ok(());
  }

  let err = io::Error::last_os_error();
  if err.raw_os_error() == Some(ERROR_LOCK_VIOLATION as i32) {
    Err(io::Error::from(io::ErrorKind::WouldBlock))
  } else {
    Err(err)
  }
}
