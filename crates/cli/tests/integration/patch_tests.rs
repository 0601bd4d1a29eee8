//! `archpatch patch` and `archpatch info` integration tests.

use predicates::prelude::*;

use super::common::{STOCK_SCRIPT, TestEnv};

#[test]
fn patch_shows_replacements_without_running() {
  let env = TestEnv::with_script(&format!("{}touch ran\n", STOCK_SCRIPT));

  env
    .archpatch_cmd()
    .arg("patch")
    .assert()
    .success()
    .stdout(predicate::str::contains("BUILD_ARCHS_SIMULATOR=\"x86_64\""))
    .stdout(predicate::str::contains("Would change 2 line(s)"));

  assert!(!env.temp_script().exists());
  assert!(!env.port_dir().join("ran").exists());
}

#[test]
fn patch_print_outputs_full_script() {
  let env = TestEnv::with_script(STOCK_SCRIPT);

  env
    .archpatch_cmd()
    .args(["patch", "--print"])
    .assert()
    .success()
    .stdout(
      "#!/bin/sh\n\
       BUILD_ARCHS_DEVICE=\"arm64e arm64\"\n\
       BUILD_ARCHS_SIMULATOR=\"x86_64\"\n\
       echo building\n",
    );
}

#[test]
fn patch_print_passes_non_utf8_bytes_through() {
  let env = TestEnv::with_script(b"# caf\xe9\nBUILD_ARCHS_DEVICE=arm64\n");

  env
    .archpatch_cmd()
    .args(["patch", "--print"])
    .assert()
    .success()
    .stdout(b"# caf\xe9\nBUILD_ARCHS_DEVICE=\"arm64e arm64\"\n".to_vec());
}

#[test]
fn patch_prefix_mode_matches_longer_names() {
  let env = TestEnv::with_script("BUILD_ARCHS_DEVICE_OLD=armv7\n");

  env
    .archpatch_cmd()
    .args(["patch", "--print"])
    .assert()
    .success()
    .stdout("BUILD_ARCHS_DEVICE_OLD=armv7\n");

  env
    .archpatch_cmd()
    .args(["patch", "--print", "--match-mode", "prefix"])
    .assert()
    .success()
    .stdout("BUILD_ARCHS_DEVICE=\"arm64e arm64\"\n");
}

#[test]
fn patch_rejects_unsafe_archs() {
  let env = TestEnv::with_script(STOCK_SCRIPT);

  env
    .archpatch_cmd()
    .args(["patch", "--device-archs", "arm64\"; rm -rf ~; echo \""])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid --device-archs"));
}

#[test]
fn patch_rejects_temp_name_equal_to_source() {
  let env = TestEnv::with_script(STOCK_SCRIPT);

  env
    .archpatch_cmd()
    .args(["patch", "--temp-name", "build.sh"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("would overwrite the source script"));
}

#[test]
fn patch_rejects_option_like_temp_name() {
  let env = TestEnv::with_script(STOCK_SCRIPT);

  env
    .archpatch_cmd()
    .args(["patch", "--temp-name=-x"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("must not start with '-'"));
}

#[test]
fn info_json_reports_effective_config() {
  let env = TestEnv::empty();

  let output = env
    .archpatch_cmd()
    .args(["info", "--output", "json", "--simulator-archs", "arm64 x86_64"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["shell"], "sh");
  assert_eq!(json["match_mode"], "assignment");
  assert_eq!(json["flags"][0]["name"], "BUILD_ARCHS_DEVICE");
  assert_eq!(json["flags"][0]["archs"], serde_json::json!(["arm64e", "arm64"]));
  assert_eq!(json["flags"][1]["archs"], serde_json::json!(["arm64", "x86_64"]));
  assert!(json["temp_script"].as_str().unwrap().ends_with("build_current.sh"));
}
