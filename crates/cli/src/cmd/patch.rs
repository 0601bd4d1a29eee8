//! Implementation of the `archpatch patch` command.
//!
//! Shows what `build` would change without writing the temp script or running
//! anything.

use std::io::Write;

use anyhow::{Context, Result};

use archpatch_lib::{PatchConfig, preview};

use crate::output::{print_info, print_replacement, print_stat, print_warning};

pub fn cmd_patch(config: &PatchConfig, print: bool) -> Result<()> {
  let rewritten = preview(config)?;

  if print {
    let mut stdout = std::io::stdout().lock();
    stdout
      .write_all(&rewritten.content)
      .and_then(|()| stdout.flush())
      .context("Failed to write patched script to stdout")?;
    return Ok(());
  }

  print_info(&format!("Patch for {}", config.source_path().display()));
  print_stat("Match mode", config.match_mode.as_str());
  print_stat("Lines", &rewritten.line_count.to_string());
  println!();

  if rewritten.is_unchanged() {
    print_warning("No architecture assignments would change");
    return Ok(());
  }

  for line in &rewritten.replaced {
    print_replacement(line.number, &line.before, &line.after);
  }
  println!();
  println!("Would change {} line(s)", rewritten.replaced.len());

  Ok(())
}
