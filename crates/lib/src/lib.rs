//! archpatch-lib: pin the architectures of the assimp iOS build script and run it.
//!
//! The crate is organised around a single run:
//! - `config`: where the script lives and which architectures to pin
//! - `rewrite`: pure line rewriting of the flag assignments
//! - `patch`: locking, the temp script, running it, and cleanup

pub mod arch;
pub mod config;
pub mod consts;
pub mod patch;
pub mod rewrite;

pub use arch::ArchList;
pub use config::{ConfigError, PatchConfig};
pub use patch::{BuildOutcome, FileAccessError, PatchError, SubprocessError, patch_and_build, preview};
pub use rewrite::{ArchOverride, MatchMode, RewrittenScript, rewrite_line, rewrite_script};
