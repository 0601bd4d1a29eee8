//! Line rewriting for shell variable assignments.
//!
//! The build script is treated as opaque text: only lines that assign one of
//! the architecture flags are replaced, everything else passes through
//! byte-for-byte.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arch::ArchList;
use crate::consts::{DEVICE_FLAG, SIMULATOR_FLAG};

/// How a line is recognized as an assignment to a flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
  /// Any line starting with the flag name, including longer identifiers
  /// such as `BUILD_ARCHS_DEVICE_EXTRA`.
  Prefix,
  /// The line must start with `FLAG=`.
  #[default]
  Assignment,
}

impl MatchMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      MatchMode::Prefix => "prefix",
      MatchMode::Assignment => "assignment",
    }
  }

  pub fn matches(&self, line: &str, flag: &str) -> bool {
    match self {
      MatchMode::Prefix => line.starts_with(flag),
      MatchMode::Assignment => line
        .strip_prefix(flag)
        .is_some_and(|rest| rest.starts_with('=')),
    }
  }
}

impl fmt::Display for MatchMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for MatchMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "prefix" => Ok(MatchMode::Prefix),
      "assignment" => Ok(MatchMode::Assignment),
      other => Err(format!("unknown match mode '{}' (expected 'prefix' or 'assignment')", other)),
    }
  }
}

/// A flag name and the value it should be pinned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchOverride {
  pub flag: String,
  pub value: String,
}

impl ArchOverride {
  pub fn new(flag: impl Into<String>, archs: &ArchList) -> Self {
    Self {
      flag: flag.into(),
      value: archs.to_string(),
    }
  }

  /// The standard pair of overrides, device first.
  pub fn pair(device: &ArchList, simulator: &ArchList) -> [ArchOverride; 2] {
    [Self::new(DEVICE_FLAG, device), Self::new(SIMULATOR_FLAG, simulator)]
  }
}

/// Rewrite a single line.
///
/// Returns `flag="value"\n` when `line` matches `flag`, otherwise the line
/// itself.
pub fn rewrite_line<'a>(line: &'a str, flag: &str, value: &str, mode: MatchMode) -> Cow<'a, str> {
  if mode.matches(line, flag) {
    Cow::Owned(format!("{}=\"{}\"\n", flag, value))
  } else {
    Cow::Borrowed(line)
  }
}

/// A line that was changed by [`rewrite_script`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacedLine {
  /// 1-based line number.
  pub number: usize,
  pub flag: String,
  pub before: String,
  pub after: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenScript {
  /// Raw script bytes. Lines that were not rewritten are copied verbatim,
  /// whatever their encoding.
  pub content: Vec<u8>,
  pub line_count: usize,
  pub replaced: Vec<ReplacedLine>,
}

impl RewrittenScript {
  pub fn is_unchanged(&self) -> bool {
    self.replaced.is_empty()
  }
}

/// Rewrite every line of `content`.
///
/// Overrides are applied in order, each one to the output of the previous,
/// so a line rewritten by the first override is what the second one sees.
///
/// Scripts are not required to be UTF-8. Flag names are ASCII, so matching
/// against a lossy decoding of the line gives the same answer as matching
/// the raw bytes, and unmatched lines are emitted untouched.
pub fn rewrite_script(content: &[u8], overrides: &[ArchOverride], mode: MatchMode) -> RewrittenScript {
  let mut out = Vec::with_capacity(content.len());
  let mut replaced = Vec::new();
  let mut line_count = 0;

  for (idx, raw) in content.split_inclusive(|&b| b == b'\n').enumerate() {
    line_count += 1;
    let line = String::from_utf8_lossy(raw);

    let mut current: Option<String> = None;
    let mut last_flag = None;
    for o in overrides {
      let text = current.as_deref().unwrap_or(&*line);
      let next = match rewrite_line(text, &o.flag, &o.value, mode) {
        Cow::Owned(next) => Some(next),
        Cow::Borrowed(_) => None,
      };
      if next.is_some() {
        current = next;
        last_flag = Some(&o.flag);
      }
    }

    match (current, last_flag) {
      (Some(new_line), Some(flag)) if new_line.as_bytes() != raw => {
        debug!(line = idx + 1, flag = %flag, "rewrote assignment");
        out.extend_from_slice(new_line.as_bytes());
        replaced.push(ReplacedLine {
          number: idx + 1,
          flag: flag.clone(),
          before: line.trim_end_matches(['\r', '\n']).to_string(),
          after: new_line.trim_end_matches('\n').to_string(),
        });
      }
      _ => out.extend_from_slice(raw),
    }
  }

  RewrittenScript {
    content: out,
    line_count,
    replaced,
  }
}
