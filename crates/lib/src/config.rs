//! Run configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `ARCHPATCH_*` environment variables. The CLI applies its flags last.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arch::{ArchList, ArchListError};
use crate::consts::{
  BUILD_SCRIPT_SUBPATH, DEFAULT_DEVICE_ARCHS, DEFAULT_LIBRARY_DIR, DEFAULT_SHELL, DEFAULT_SIMULATOR_ARCHS,
  DEFAULT_TEMP_NAME, OUTPUT_SUBDIR, env_vars,
};
use crate::rewrite::{ArchOverride, MatchMode};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config file {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },

  #[error("invalid {field}: {source}")]
  InvalidArchs {
    field: &'static str,
    #[source]
    source: ArchListError,
  },

  #[error("invalid value for {var}: {message}")]
  InvalidEnv { var: &'static str, message: String },

  #[error("temp script name must be a plain file name, got '{0}'")]
  InvalidTempName(String),

  #[error("temp script name '{0}' must not start with '-'")]
  OptionLikeTempName(String),

  #[error("temp script name '{name}' would overwrite the source script {}", source_path.display())]
  TempCollidesWithSource { name: String, source_path: PathBuf },

  #[error("source script path has no file name: {}", .0.display())]
  InvalidSource(PathBuf),
}

/// Settings for one patch-and-build run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
  /// Root of the native library checkout.
  pub library_dir: PathBuf,
  /// Explicit script location; derived from `library_dir` when unset.
  pub source_path: Option<PathBuf>,
  /// File name of the patched script, created next to the source.
  pub temp_name: String,
  /// Explicit artifact directory; derived from `library_dir` when unset.
  pub output_dir: Option<PathBuf>,
  pub device_archs: ArchList,
  pub simulator_archs: ArchList,
  pub shell: String,
  pub match_mode: MatchMode,
}

impl Default for PatchConfig {
  fn default() -> Self {
    Self {
      library_dir: PathBuf::from(DEFAULT_LIBRARY_DIR),
      source_path: None,
      temp_name: DEFAULT_TEMP_NAME.to_string(),
      output_dir: None,
      device_archs: ArchList::from_static(DEFAULT_DEVICE_ARCHS),
      simulator_archs: ArchList::from_static(DEFAULT_SIMULATOR_ARCHS),
      shell: DEFAULT_SHELL.to_string(),
      match_mode: MatchMode::default(),
    }
  }
}

impl PatchConfig {
  /// Load a TOML config file. Missing keys keep their defaults.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Override fields from `ARCHPATCH_*` environment variables.
  pub fn apply_env(mut self) -> Result<Self, ConfigError> {
    if let Some(dir) = env_var(env_vars::LIBRARY_DIR) {
      self.set_library_dir(PathBuf::from(dir));
    }
    if let Some(source) = env_var(env_vars::SOURCE) {
      self.source_path = Some(PathBuf::from(source));
    }
    if let Some(archs) = env_var(env_vars::DEVICE_ARCHS) {
      self.device_archs = archs.parse().map_err(|e: ArchListError| ConfigError::InvalidEnv {
        var: env_vars::DEVICE_ARCHS,
        message: e.to_string(),
      })?;
    }
    if let Some(archs) = env_var(env_vars::SIMULATOR_ARCHS) {
      self.simulator_archs = archs.parse().map_err(|e: ArchListError| ConfigError::InvalidEnv {
        var: env_vars::SIMULATOR_ARCHS,
        message: e.to_string(),
      })?;
    }
    if let Some(shell) = env_var(env_vars::SHELL) {
      self.shell = shell;
    }
    Ok(self)
  }

  /// Point at a different library checkout.
  ///
  /// Script and output paths inherited from a lower layer are dropped so they
  /// are derived from the new directory again.
  pub fn set_library_dir(&mut self, dir: PathBuf) {
    self.library_dir = dir;
    self.source_path = None;
    self.output_dir = None;
  }

  pub fn source_path(&self) -> PathBuf {
    self
      .source_path
      .clone()
      .unwrap_or_else(|| self.library_dir.join(BUILD_SCRIPT_SUBPATH))
  }

  /// Directory the patched script runs from.
  pub fn script_dir(&self) -> PathBuf {
    match self.source_path().parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
      _ => PathBuf::from("."),
    }
  }

  pub fn temp_path(&self) -> PathBuf {
    self.script_dir().join(&self.temp_name)
  }

  pub fn output_dir(&self) -> PathBuf {
    self
      .output_dir
      .clone()
      .unwrap_or_else(|| self.library_dir.join(OUTPUT_SUBDIR))
  }

  pub fn overrides(&self) -> [ArchOverride; 2] {
    ArchOverride::pair(&self.device_archs, &self.simulator_archs)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    let source = self.source_path();
    let source_name = source
      .file_name()
      .ok_or_else(|| ConfigError::InvalidSource(source.clone()))?;

    let temp = Path::new(&self.temp_name);
    let is_plain_name = temp.file_name().is_some_and(|n| n == temp.as_os_str());
    if self.temp_name.is_empty() || !is_plain_name {
      return Err(ConfigError::InvalidTempName(self.temp_name.clone()));
    }
    // The shell would parse it as an option instead of a script.
    if self.temp_name.starts_with('-') {
      return Err(ConfigError::OptionLikeTempName(self.temp_name.clone()));
    }

    if source_name == temp.as_os_str() {
      return Err(ConfigError::TempCollidesWithSource {
        name: self.temp_name.clone(),
        source_path: source,
      });
    }

    Ok(())
  }
}

/// Parse an architecture list for the named setting.
pub fn parse_archs(field: &'static str, value: &str) -> Result<ArchList, ConfigError> {
  value
    .parse()
    .map_err(|source| ConfigError::InvalidArchs { field, source })
}

fn env_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
