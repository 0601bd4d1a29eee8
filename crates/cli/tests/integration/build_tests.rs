//! `archpatch build` integration tests.

use predicates::prelude::*;

use super::common::{STOCK_SCRIPT, TestEnv};

#[test]
fn build_patches_runs_and_cleans_up() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::with_script(&format!("{}cp \"$0\" captured.sh\n", STOCK_SCRIPT));

  env
    .archpatch_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete!"))
    .stdout(predicate::str::contains("BUILD_ARCHS_DEVICE=\"arm64e arm64\""))
    .stdout(predicate::str::contains("building"));

  let captured = std::fs::read_to_string(env.port_dir().join("captured.sh")).unwrap();
  assert_eq!(
    captured,
    "#!/bin/sh\n\
     BUILD_ARCHS_DEVICE=\"arm64e arm64\"\n\
     BUILD_ARCHS_SIMULATOR=\"x86_64\"\n\
     echo building\n\
     cp \"$0\" captured.sh\n"
  );
  assert!(!env.temp_script().exists());
}

#[test]
fn build_uses_architecture_overrides() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::with_script("BUILD_ARCHS_DEVICE=armv7\nBUILD_ARCHS_SIMULATOR=i386\ncp \"$0\" captured.sh\n");

  env
    .archpatch_cmd()
    .arg("build")
    .arg("--device-archs")
    .arg("arm64")
    .env("ARCHPATCH_SIMULATOR_ARCHS", "arm64 x86_64")
    .assert()
    .success();

  let captured = std::fs::read_to_string(env.port_dir().join("captured.sh")).unwrap();
  assert!(captured.contains("BUILD_ARCHS_DEVICE=\"arm64\"\n"));
  assert!(captured.contains("BUILD_ARCHS_SIMULATOR=\"arm64 x86_64\"\n"));
}

#[test]
fn build_lists_artifacts() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::with_script("mkdir -p ../../lib/iOS\nprintf 'fat' > ../../lib/iOS/libassimp-fat.a\n");

  env
    .archpatch_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("libassimp-fat.a (3 B)"));
}

#[test]
fn build_failure_exits_non_zero_and_removes_temp() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::with_script("BUILD_ARCHS_DEVICE=arm64\nexit 1\n");

  env
    .archpatch_cmd()
    .arg("build")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("sh build_current.sh"))
    .stderr(predicate::str::contains("exited with status 1"));

  assert!(!env.temp_script().exists());
}

#[test]
fn build_missing_script_fails_without_temp() {
  let env = TestEnv::empty();
  std::fs::create_dir_all(env.port_dir()).unwrap();

  env
    .archpatch_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to read build script"))
    .stderr(predicate::str::contains("build.sh"));

  assert!(!env.temp_script().exists());
}

#[test]
fn build_with_explicit_source_and_config_file() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::empty();
  env.write_file("vendor/ios/make.sh", "BUILD_ARCHS_SIMULATOR=i386\ncp \"$0\" captured.sh\n");
  env.write_file(
    "archpatch.toml",
    "simulator_archs = \"arm64\"\ntemp_name = \"make_patched.sh\"\n",
  );

  env
    .archpatch_cmd()
    .arg("--config")
    .arg("archpatch.toml")
    .arg("build")
    .arg("--source")
    .arg("vendor/ios/make.sh")
    .assert()
    .success();

  let captured = std::fs::read_to_string(env.path("vendor/ios/captured.sh")).unwrap();
  assert_eq!(captured, "BUILD_ARCHS_SIMULATOR=\"arm64\"\ncp \"$0\" captured.sh\n");
  assert!(!env.path("vendor/ios/make_patched.sh").exists());
}
