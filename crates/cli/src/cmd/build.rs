//! Implementation of the `archpatch build` command.
//!
//! Patches the architecture flags in the build script, runs the patched copy
//! and reports what was produced.

use anyhow::{Context, Result};

use archpatch_lib::{PatchConfig, patch_and_build};

use crate::output::{
  format_bytes, format_duration, print_info, print_replacement, print_stat, print_success, print_warning,
};

pub fn cmd_build(config: &PatchConfig) -> Result<()> {
  print_info(&format!(
    "Building {} (device: {}, simulator: {})",
    config.source_path().display(),
    config.device_archs,
    config.simulator_archs
  ));

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let outcome = rt.block_on(patch_and_build(config))?;

  println!();
  if outcome.replaced.is_empty() {
    print_warning("No architecture assignments were changed");
  }
  for line in &outcome.replaced {
    print_replacement(line.number, &line.before, &line.after);
  }

  println!();
  print_success("Build complete!");
  print_stat("Script", &outcome.source.display().to_string());
  print_stat("Lines", &outcome.line_count.to_string());
  print_stat("Elapsed", &format_duration(outcome.elapsed));

  let output_dir = config.output_dir();
  if outcome.artifacts.is_empty() {
    print_stat("Artifacts", &format!("none in {}", output_dir.display()));
  } else {
    print_stat("Artifacts", &output_dir.display().to_string());
    for artifact in &outcome.artifacts {
      let name = artifact.path.strip_prefix(&output_dir).unwrap_or(&artifact.path);
      println!("    {} ({})", name.display(), format_bytes(artifact.size));
    }
  }

  Ok(())
}
