mod build;
mod info;
mod patch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use archpatch_lib::config::parse_archs;
use archpatch_lib::{MatchMode, PatchConfig};

pub use build::cmd_build;
pub use info::cmd_info;
pub use patch::cmd_patch;

/// Overrides shared by every command. Unset flags fall back to the config
/// file, then `ARCHPATCH_*` environment variables, then built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct PatchArgs {
  /// Root of the assimp checkout (default: ./assimpLib). Replaces any script
  /// or output path inherited from the config file or environment
  #[arg(long, value_name = "DIR")]
  pub library_dir: Option<PathBuf>,

  /// Build script to patch (default: <library-dir>/port/iOS/build.sh)
  #[arg(long, value_name = "FILE")]
  pub source: Option<PathBuf>,

  /// Device architectures, space separated (default: "arm64e arm64")
  #[arg(long, value_name = "ARCHS")]
  pub device_archs: Option<String>,

  /// Simulator architectures, space separated (default: "x86_64")
  #[arg(long, value_name = "ARCHS")]
  pub simulator_archs: Option<String>,

  /// Shell used to run the patched script (default: sh)
  #[arg(long)]
  pub shell: Option<String>,

  /// File name of the patched script (default: build_current.sh)
  #[arg(long, value_name = "NAME")]
  pub temp_name: Option<String>,

  /// How flag lines are recognized: "assignment" (FLAG=) or "prefix"
  #[arg(long, value_name = "MODE")]
  pub match_mode: Option<MatchMode>,
}

/// Build the effective configuration from all layers.
pub fn resolve_config(config_file: Option<&Path>, args: &PatchArgs) -> Result<PatchConfig> {
  let base = match config_file {
    Some(path) => PatchConfig::from_file(path)?,
    None => PatchConfig::default(),
  };
  let mut config = base.apply_env().context("Failed to apply environment overrides")?;

  if let Some(dir) = &args.library_dir {
    config.set_library_dir(dir.clone());
  }
  if let Some(source) = &args.source {
    config.source_path = Some(source.clone());
  }
  if let Some(archs) = &args.device_archs {
    config.device_archs = parse_archs("--device-archs", archs)?;
  }
  if let Some(archs) = &args.simulator_archs {
    config.simulator_archs = parse_archs("--simulator-archs", archs)?;
  }
  if let Some(shell) = &args.shell {
    config.shell = shell.clone();
  }
  if let Some(name) = &args.temp_name {
    config.temp_name = name.clone();
  }
  if let Some(mode) = args.match_mode {
    config.match_mode = mode;
  }

  config.validate()?;
  debug!(?config, "resolved configuration");
  Ok(config)
}
