use anyhow::Result;
use serde::Serialize;

use archpatch_lib::PatchConfig;
use archpatch_lib::consts::{DEVICE_FLAG, SIMULATOR_FLAG};

use crate::output::{OutputFormat, print_json, print_stat, print_success};

#[derive(Serialize)]
struct InfoReport<'a> {
  source: String,
  temp_script: String,
  output_dir: String,
  shell: &'a str,
  match_mode: &'a str,
  flags: [FlagReport<'a>; 2],
}

#[derive(Serialize)]
struct FlagReport<'a> {
  name: &'a str,
  archs: &'a [String],
}

pub fn cmd_info(config: &PatchConfig, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    let report = InfoReport {
      source: config.source_path().display().to_string(),
      temp_script: config.temp_path().display().to_string(),
      output_dir: config.output_dir().display().to_string(),
      shell: &config.shell,
      match_mode: config.match_mode.as_str(),
      flags: [
        FlagReport {
          name: DEVICE_FLAG,
          archs: config.device_archs.archs(),
        },
        FlagReport {
          name: SIMULATOR_FLAG,
          archs: config.simulator_archs.archs(),
        },
      ],
    };
    return print_json(&report);
  }

  print_success(&format!("archpatch v{}", env!("CARGO_PKG_VERSION")));
  println!();
  print_stat("Source", &config.source_path().display().to_string());
  print_stat("Temp script", &config.temp_path().display().to_string());
  print_stat("Output dir", &config.output_dir().display().to_string());
  print_stat("Shell", &config.shell);
  print_stat("Match mode", config.match_mode.as_str());
  print_stat(DEVICE_FLAG, &config.device_archs.to_string());
  print_stat(SIMULATOR_FLAG, &config.simulator_archs.to_string());

  Ok(())
}
