//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Build script with the stock assimp flag values.
pub const STOCK_SCRIPT: &str = "#!/bin/sh\n\
BUILD_ARCHS_DEVICE=\"armv7 arm64\"\n\
BUILD_ARCHS_SIMULATOR=\"i386 x86_64\"\n\
echo building\n";

/// Isolated test environment.
///
/// Each test gets its own temporary working directory containing an
/// `assimpLib/port/iOS/build.sh`, matching the default layout.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn with_script(content: impl AsRef<[u8]>) -> Self {
    let env = Self::empty();
    env.write_file("assimpLib/port/iOS/build.sh", content);
    env
  }

  /// Create an environment without a build script.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: impl AsRef<[u8]>) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  pub fn port_dir(&self) -> PathBuf {
    self.path("assimpLib/port/iOS")
  }

  pub fn temp_script(&self) -> PathBuf {
    self.port_dir().join("build_current.sh")
  }

  /// Get a Command for the archpatch binary running inside the temp dir.
  ///
  /// `ARCHPATCH_*` variables from the outer environment are cleared.
  pub fn archpatch_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("archpatch");
    cmd.current_dir(self.temp.path());
    for var in [
      "ARCHPATCH_LIBRARY_DIR",
      "ARCHPATCH_SOURCE",
      "ARCHPATCH_DEVICE_ARCHS",
      "ARCHPATCH_SIMULATOR_ARCHS",
      "ARCHPATCH_SHELL",
    ] {
      cmd.env_remove(var);
    }
    cmd
  }
}
