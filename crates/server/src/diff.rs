//! Git-diff helpers (spec.md §4.4 "Git-diff helpers").

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

const STAT_TIMEOUT: Duration = Duration::from_secs(5);
const FULL_TIMEOUT: Duration = Duration::from_secs(10);

/// Shells out to `git diff HEAD --no-color` (optionally `--stat`) from
/// `work_dir`. Returns trimmed output, or `None` on any failure (not a repo,
/// missing binary, non-zero exit, timeout).
pub async fn get_git_diff(work_dir: &Path, full: bool) -> Option<String> {
    let mut cmd = Command::new("git");
    cmd.current_dir(work_dir);
    cmd.arg("diff").arg("HEAD").arg("--no-color");
    if !full {
        cmd.arg("--stat");
    }
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::null());

    let timeout = if full { FULL_TIMEOUT } else { STAT_TIMEOUT };
    let output = tokio::time::timeout(timeout, cmd.output()).await.ok()?.ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Some(text)
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
