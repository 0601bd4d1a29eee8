//! Running the patched script.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, info};

use super::types::SubprocessError;

/// Run `<shell> <script>` from `cwd` and wait for it to exit.
///
/// `script` is resolved relative to `cwd`. The child inherits stdout and
/// stderr so the build log streams straight to the terminal. A non-zero
/// exit is returned as `SubprocessError::Exited`.
pub async fn run_script(shell: &str, script: &str, cwd: &Path) -> Result<ExitStatus, SubprocessError> {
  let command_line = format!("{} {}", shell, script);
  info!(cmd = %command_line, cwd = %cwd.display(), "running patched script");

  let mut command = Command::new(shell);
  command
    .arg(script)
    .current_dir(cwd)
    .stdin(Stdio::inherit())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit());

  let status = command
    .status()
    .await
    .map_err(|source| SubprocessError::Spawn {
      command: command_line.clone(),
      cwd: cwd.to_path_buf(),
      source,
    })?;

  debug!(cmd = %command_line, status = %status, "script exited");

  if !status.success() {
    return Err(SubprocessError::Exited {
      command: command_line,
      code: status.code(),
    });
  }

  Ok(status)
}
