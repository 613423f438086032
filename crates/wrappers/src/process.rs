//! Base spawn/capture/timeout machinery shared by every wrapper (spec.md
//! §4.1 `execute`/`executeStream`/`version`).

use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use gw_core::{AgentResult, AgentStatus, AgentTask};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::io::{AsyncReadExt, AsyncRead};
use tokio::process::Command;
use tokio::sync::{mpsc, Mutex};

fn build_command(binary: &str, argv: &[String], task: &AgentTask) -> Command {
    let mut cmd = Command::new(binary);
    cmd.args(argv);
    if let Some(wd) = &task.work_dir {
        cmd.current_dir(wd);
    }
    for (k, v) in &task.env {
        cmd.env(k, v);
    }
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd
}

fn send_sigterm(pid: u32) {
    if signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM).is_err() {
        tracing::debug!(pid, "SIGTERM delivery failed, child likely already exited");
    }
}

/// Spawns a reader task that drains `stream` to completion into a shared
/// buffer. Returns the join handle and the buffer so the caller can read it
/// back after the reader finishes (or abandon it on timeout).
fn spawn_reader<R>(stream: Option<R>) -> (tokio::task::JoinHandle<()>, Arc<Mutex<String>>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let buf = Arc::new(Mutex::new(String::new()));
    let buf2 = buf.clone();
    let handle = tokio::spawn(async move {
        if let Some(mut s) = stream {
            let mut tmp = Vec::new();
            let _ = s.read_to_end(&mut tmp).await;
            let mut guard = buf2.lock().await;
            *guard = String::from_utf8_lossy(&tmp).into_owned();
        }
    });
    (handle, buf)
}

/// Spawns `binary argv`, waits up to `task.timeout`, and resolves exactly
/// once with success/error/timeout, matching spec.md's "settled" contract.
pub async fn execute(agent_id: &str, binary: &str, argv: &[String], task: &AgentTask) -> AgentResult {
    let start = Instant::now();
    let mut cmd = build_command(binary, argv, task);
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => return AgentResult::error(agent_id, format!("failed to spawn {binary}: {e}")),
    };

    let (stdout_handle, stdout_buf) = spawn_reader(child.stdout.take());
    let (stderr_handle, stderr_buf) = spawn_reader(child.stderr.take());

    let timed_out;
    let exit_status = tokio::select! {
        status = child.wait() => {
            timed_out = false;
            status.ok()
        }
        _ = tokio::time::sleep(task.timeout) => {
            timed_out = true;
            if let Some(pid) = child.id() {
                send_sigterm(pid);
            }
            tokio::time::timeout(Duration::from_millis(500), child.wait())
                .await
                .ok()
                .and_then(|r| r.ok())
        }
    };
    let _ = tokio::join!(stdout_handle, stderr_handle);
    let duration_ms = start.elapsed().as_millis() as u64;
    let output = stdout_buf.lock().await.clone();
    let stderr = stderr_buf.lock().await.clone();
    let stderr = if stderr.is_empty() { None } else { Some(stderr) };

    if timed_out {
        return AgentResult {
            agent_id: agent_id.to_string(),
            status: AgentStatus::Timeout,
            output,
            stderr,
            exit_code: None,
            duration_ms,
        };
    }

    match exit_status {
        Some(status) => AgentResult {
            agent_id: agent_id.to_string(),
            status: if status.success() {
                AgentStatus::Success
            } else {
                AgentStatus::Error
            },
            output,
            stderr,
            exit_code: status.code(),
            duration_ms,
        },
        None => AgentResult::error(agent_id, "child process did not report an exit status"),
    }
}

/// Streaming variant of [`execute`]: forwards stdout chunks to `tx` as they
/// arrive (bounded channel, so a slow consumer paces the producer via
/// `send().await`) and resolves an [`AgentResult`] once the child has
/// exited, been killed on timeout, or the consumer dropped the channel.
pub async fn execute_stream_task(
    agent_id: String,
    binary: String,
    argv: Vec<String>,
    task: AgentTask,
    tx: mpsc::Sender<String>,
) -> AgentResult {
    let start = Instant::now();
    let mut cmd = build_command(&binary, &argv, &task);
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => return AgentResult::error(&agent_id, format!("failed to spawn {binary}: {e}")),
    };

    let (stderr_handle, stderr_buf) = spawn_reader(child.stderr.take());
    let mut stdout = child.stdout.take();

    let sleep = tokio::time::sleep(task.timeout);
    tokio::pin!(sleep);
    let mut timed_out = false;

    if let Some(mut out) = stdout.take() {
        let mut buf = [0u8; 4096];
        loop {
            tokio::select! {
                biased;
                _ = &mut sleep => {
                    timed_out = true;
                    break;
                }
                n = out.read(&mut buf) => {
                    match n {
                        Ok(0) => break,
                        Ok(n) => {
                            let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                            if tx.send(chunk).await.is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
        }
    }

    if timed_out {
        if let Some(pid) = child.id() {
            send_sigterm(pid);
        }
    }
    let exit = tokio::time::timeout(Duration::from_secs(5), child.wait()).await;
    let _ = stderr_handle.await;
    let duration_ms = start.elapsed().as_millis() as u64;
    let stderr = stderr_buf.lock().await.clone();
    let stderr = if stderr.is_empty() { None } else { Some(stderr) };

    if timed_out {
        return AgentResult {
            agent_id,
            status: AgentStatus::Timeout,
            output: String::new(),
            stderr,
            exit_code: None,
            duration_ms,
        };
    }
    match exit {
        Ok(Ok(status)) => AgentResult {
            agent_id,
            status: if status.success() {
                AgentStatus::Success
            } else {
                AgentStatus::Error
            },
            output: String::new(),
            stderr,
            exit_code: status.code(),
            duration_ms,
        },
        _ => AgentResult::error(&agent_id, "child did not exit within the post-stream grace period"),
    }
}

/// Base `version()` strategy: `<binary> --version` with a short timeout,
/// first line of stdout trimmed. `None` on any failure or empty output.
pub async fn probe_version(binary: &str, timeout: Duration) -> Option<String> {
    let mut cmd = Command::new(binary);
    cmd.arg("--version");
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::null());
    let mut child = cmd.spawn().ok()?;
    let mut stdout = child.stdout.take()?;
    let read = async {
        let mut buf = Vec::new();
        let _ = stdout.read_to_end(&mut buf).await;
        buf
    };
    let buf = tokio::time::timeout(timeout, read).await.ok()?;
    let _ = tokio::time::timeout(Duration::from_millis(200), child.wait()).await;
    let text = String::from_utf8_lossy(&buf);
    let first_line = text.lines().next()?.trim();
    if first_line.is_empty() {
        None
    } else {
        Some(first_line.to_string())
    }
}

/// Version-probe override for agents that print a version banner and then
/// hang instead of exiting (the "Gemini class", spec.md §4.1). Spawns,
/// captures stdout for `grace`, kills unconditionally, and returns the
/// first non-empty buffered line.
pub async fn probe_version_hang_after_banner(binary: &str, grace: Duration) -> Option<String> {
    let mut cmd = Command::new(binary);
    cmd.arg("--version");
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::null());
    let mut child = cmd.spawn().ok()?;
    let (handle, buf) = spawn_reader(child.stdout.take());
    tokio::time::sleep(grace).await;
    if let Some(pid) = child.id() {
        send_sigterm(pid);
    }
    let _ = tokio::time::timeout(Duration::from_millis(500), child.wait()).await;
    let _ = tokio::time::timeout(Duration::from_millis(500), handle).await;
    let text = buf.lock().await.clone();
    text.lines().map(str::trim).find(|l| !l.is_empty()).map(str::to_string)
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
