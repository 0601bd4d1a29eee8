mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{PatchArgs, cmd_build, cmd_info, cmd_patch, resolve_config};
use output::{OutputFormat, print_error};

/// archpatch - pin the architectures of the assimp iOS build script and run it
#[derive(Parser)]
#[command(name = "archpatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// TOML file with default settings
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Patch the build script, run it, and remove the patched copy
  Build {
    #[command(flatten)]
    args: PatchArgs,
  },

  /// Show the lines that would be rewritten, without running anything
  Patch {
    #[command(flatten)]
    args: PatchArgs,

    /// Print the whole patched script instead of a summary
    #[arg(long)]
    print: bool,
  },

  /// Show the effective configuration
  Info {
    #[command(flatten)]
    args: PatchArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(err) = run(cli) {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  let config_file = cli.config.as_deref();

  match cli.command {
    Commands::Build { args } => cmd_build(&resolve_config(config_file, &args)?),
    Commands::Patch { args, print } => cmd_patch(&resolve_config(config_file, &args)?, print),
    Commands::Info { args, output } => cmd_info(&resolve_config(config_file, &args)?, output),
  }
}
