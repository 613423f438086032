//! PTY Manager (spec.md §4.5): allocates pseudo-terminals, fans out raw
//! output bytes, keeps bounded scrollback, handles resize/kill, and retains
//! exited sessions for a grace period so late subscribers can still read
//! scrollback.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use gw_core::PtySessionId;
use parking_lot::Mutex;
use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use tokio::sync::broadcast;

use crate::error::PtyError;
use crate::session::{PtyEvent, PtySessionHandle};

pub const DEFAULT_COLS: u16 = 220;
pub const DEFAULT_ROWS: u16 = 50;
pub const POST_EXIT_RETENTION: Duration = Duration::from_secs(30);

pub struct PtySpawnConfig {
    pub id: PtySessionId,
    pub agent_id: String,
    pub cmd: String,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    pub cols: Option<u16>,
    pub rows: Option<u16>,
}

#[cfg(unix)]
fn build_command(cmd: &str) -> CommandBuilder {
    let mut builder = CommandBuilder::new("/bin/sh");
    builder.arg("-c");
    builder.arg(cmd);
    builder
}

#[cfg(windows)]
fn build_command(cmd: &str) -> CommandBuilder {
    let mut builder = CommandBuilder::new("cmd.exe");
    builder.arg("/c");
    builder.arg(cmd);
    builder
}

pub struct PtyManager {
    sessions: Arc<Mutex<HashMap<PtySessionId, Arc<PtySessionHandle>>>>,
}

impl Default for PtyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PtyManager {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get(&self, id: &PtySessionId) -> Option<Arc<PtySessionHandle>> {
        self.sessions.lock().get(id).cloned()
    }

    pub fn list(&self) -> Vec<Arc<PtySessionHandle>> {
        self.sessions.lock().values().cloned().collect()
    }

    /// Allocates a pty, spawns `cmd` under it, and starts the background
    /// reader and exit-watch tasks. Fails if `id` is already in use.
    pub fn spawn(&self, config: PtySpawnConfig) -> Result<Arc<PtySessionHandle>, PtyError> {
        {
            let sessions = self.sessions.lock();
            if sessions.contains_key(&config.id) {
                return Err(PtyError::DuplicateId(config.id.as_str().to_string()));
            }
        }

        let cols = config.cols.filter(|&c| c > 0).unwrap_or(DEFAULT_COLS);
        let rows = config.rows.filter(|&r| r > 0).unwrap_or(DEFAULT_ROWS);

        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| PtyError::Backend(e.into()))?;

        let mut cmd_builder = build_command(&config.cmd);
        cmd_builder.env("TERM", "xterm-256color");
        for (k, v) in &config.env {
            cmd_builder.env(k, v);
        }
        if let Some(cwd) = &config.cwd {
            cmd_builder.cwd(cwd);
        }

        let mut child = pair
            .slave
            .spawn_command(cmd_builder)
            .map_err(|e| PtyError::Backend(e.into()))?;
        drop(pair.slave);

        let killer = child.clone_killer();
        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| PtyError::Backend(e.into()))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| PtyError::Backend(e.into()))?;

        let (events_tx, _) = broadcast::channel(256);
        let handle = Arc::new(PtySessionHandle::new(
            config.id.clone(),
            config.agent_id.clone(),
            cols,
            rows,
            writer,
            pair.master,
            killer,
            events_tx,
        ));

        self.sessions.lock().insert(config.id.clone(), handle.clone());

        spawn_reader_thread(handle.clone(), reader);
        self.spawn_exit_watcher(handle.clone(), child);

        tracing::info!(session_id = %config.id, agent_id = %config.agent_id, cols, rows, "pty session spawned");
        Ok(handle)
    }

    fn spawn_exit_watcher(&self, handle: Arc<PtySessionHandle>, mut child: Box<dyn portable_pty::Child + Send + Sync>) {
        let (exit_tx, exit_rx) = tokio::sync::oneshot::channel::<Option<i32>>();
        let handle_for_exit = handle.clone();
        std::thread::spawn(move || {
            let status = child.wait();
            handle_for_exit.mark_dead();
            let code = status.ok().map(|s| s.exit_code() as i32);
            let _ = handle_for_exit.events.send(PtyEvent::Exit(code));
            let _ = exit_tx.send(code);
        });

        let sessions = self.sessions.clone();
        let id = handle.id.clone();
        tokio::spawn(async move {
            let _ = exit_rx.await;
            tokio::time::sleep(POST_EXIT_RETENTION).await;
            sessions.lock().remove(&id);
            tracing::debug!(session_id = %id, "pty session retention expired, removed");
        });
    }

    pub fn kill_all(&self) {
        for handle in self.list() {
            handle.kill();
        }
    }
}

fn spawn_reader_thread(handle: Arc<PtySessionHandle>, mut reader: Box<dyn std::io::Read + Send>) {
    std::thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match std::io::Read::read(&mut reader, &mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                    handle.append_scrollback(&chunk);
                    let _ = handle.events.send(PtyEvent::Data(chunk));
                }
                Err(_) => break,
            }
        }
    });
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
