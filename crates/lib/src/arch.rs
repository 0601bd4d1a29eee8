//! Architecture token lists written into the build script.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchListError {
  #[error("architecture list is empty")]
  Empty,

  #[error("invalid architecture '{token}': only letters, digits, '_' and '-' are allowed")]
  InvalidToken { token: String },
}

/// A non-empty, space separated list of architectures (e.g. `arm64e arm64`).
///
/// Tokens are restricted to `[A-Za-z0-9_-]` since the list ends up inside a
/// double-quoted shell assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArchList(Vec<String>);

impl ArchList {
  /// Build from a compile-time list without validation.
  pub(crate) fn from_static(archs: &'static str) -> Self {
    Self(archs.split_whitespace().map(str::to_string).collect())
  }

  pub fn archs(&self) -> &[String] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn contains(&self, arch: &str) -> bool {
    self.0.iter().any(|a| a == arch)
  }
}

fn is_valid_token(token: &str) -> bool {
  token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl FromStr for ArchList {
  type Err = ArchListError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let tokens: Vec<String> = s.split_whitespace().map(str::to_string).collect();
    if tokens.is_empty() {
      return Err(ArchListError::Empty);
    }
    if let Some(bad) = tokens.iter().find(|t| !is_valid_token(t)) {
      return Err(ArchListError::InvalidToken { token: bad.clone() });
    }
    Ok(Self(tokens))
  }
}

impl TryFrom<String> for ArchList {
  type Error = ArchListError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<ArchList> for String {
  fn from(list: ArchList) -> Self {
    list.to_string()
  }
}

impl fmt::Display for ArchList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.join(" "))
  }
}
