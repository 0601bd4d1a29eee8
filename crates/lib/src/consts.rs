/// Shell variable holding the device architectures.
pub const DEVICE_FLAG: &str = "BUILD_ARCHS_DEVICE";

/// Shell variable holding the simulator architectures.
pub const SIMULATOR_FLAG: &str = "BUILD_ARCHS_SIMULATOR";

pub const DEFAULT_DEVICE_ARCHS: &str = "arm64e arm64";
pub const DEFAULT_SIMULATOR_ARCHS: &str = "x86_64";

pub const DEFAULT_LIBRARY_DIR: &str = "./assimpLib";

/// Build script location, relative to the library directory.
pub const BUILD_SCRIPT_SUBPATH: &str = "port/iOS/build.sh";

/// Compiled library location, relative to the library directory.
pub const OUTPUT_SUBDIR: &str = "lib/iOS";

pub const DEFAULT_TEMP_NAME: &str = "build_current.sh";
pub const DEFAULT_SHELL: &str = "sh";

/// Environment variable names read by `PatchConfig::apply_env`.
pub mod env_vars {
  pub const LIBRARY_DIR: &str = "ARCHPATCH_LIBRARY_DIR";
  pub const SOURCE: &str = "ARCHPATCH_SOURCE";
  pub const DEVICE_ARCHS: &str = "ARCHPATCH_DEVICE_ARCHS";
  pub const SIMULATOR_ARCHS: &str = "ARCHPATCH_SIMULATOR_ARCHS";
  pub const SHELL: &str = "ARCHPATCH_SHELL";
}
