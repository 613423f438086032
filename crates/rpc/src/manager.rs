//! RPC Session Manager (spec.md §4.6): maintains named, long-lived agent
//! sessions backed by PTYs. Threads (§4.7) and teams (§4.8) compose on top
//! of this rather than spawning their own processes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use gw_core::{Clock, PtySessionId, RpcSessionId};
use gw_pty::{PtyEvent, PtyManager, PtySpawnConfig};
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::error::RpcError;
use crate::session::{RpcEvent, RpcSession, RpcSessionInfo};

/// How long stdout must be quiet before a session is considered idle.
pub const DEFAULT_IDLE_AFTER: Duration = Duration::from_millis(800);

pub struct RpcSessionManager {
    pty: Arc<PtyManager>,
    clock: Arc<dyn Clock>,
    command: String,
    idle_after: Duration,
    sessions: Mutex<HashMap<RpcSessionId, Arc<RpcSession>>>,
    events: broadcast::Sender<(RpcSessionId, RpcEvent)>,
}

impl RpcSessionManager {
    pub fn new(pty: Arc<PtyManager>, clock: Arc<dyn Clock>, command: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(1024);
        Self {
            pty,
            clock,
            command: command.into(),
            idle_after: DEFAULT_IDLE_AFTER,
            sessions: Mutex::new(HashMap::new()),
            events,
        }
    }

    pub fn with_idle_after(mut self, idle_after: Duration) -> Self {
        self.idle_after = idle_after;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<(RpcSessionId, RpcEvent)> {
        self.events.subscribe()
    }

    /// Starts a long-lived agent-RPC client in `cwd`. Fails if `id` is
    /// already registered.
    pub fn create(&self, id: RpcSessionId, cwd: Option<PathBuf>) -> Result<RpcSessionInfo, RpcError> {
        {
            let sessions = self.sessions.lock();
            if sessions.contains_key(&id) {
                return Err(RpcError::DuplicateId(id.as_str().to_string()));
            }
        }

        let pty_id = PtySessionId::from_string(id.as_str());
        let handle = self.pty.spawn(PtySpawnConfig {
            id: pty_id,
            agent_id: id.as_str().to_string(),
            cmd: self.command.clone(),
            cwd: cwd.clone(),
            env: vec![],
            cols: None,
            rows: None,
        })?;

        let session = Arc::new(RpcSession::new(id.clone(), cwd, self.clock.now_ms(), handle.clone()));
        self.sessions.lock().insert(id.clone(), session.clone());

        spawn_idle_watcher(id.clone(), session, handle.subscribe(), self.idle_after, self.events.clone());

        tracing::info!(session_id = %id, "rpc session created");
        Ok(self.sessions.lock().get(&id).expect("just inserted").info())
    }

    /// Forwards `text` to the session. Errors if the id is missing or dead.
    pub fn prompt(&self, id: &RpcSessionId, text: &str) -> Result<(), RpcError> {
        let session = self.get(id)?;
        if !session.is_alive() {
            return Err(RpcError::Dead(id.as_str().to_string()));
        }
        session.pty.write(text)?;
        session.pty.write("\n")?;
        Ok(())
    }

    /// Cancels the current prompt without killing the session. No-op on
    /// unknown id.
    pub fn abort(&self, id: &RpcSessionId) {
        if let Some(session) = self.sessions.lock().get(id).cloned() {
            let _ = session.pty.write("\x03");
        }
    }

    /// Terminates a session and releases its resources. No-op on unknown id.
    pub fn kill(&self, id: &RpcSessionId) {
        if let Some(session) = self.sessions.lock().get(id).cloned() {
            session.mark_dead();
            session.pty.kill();
            let _ = self.events.send((id.clone(), RpcEvent::Killed));
        }
    }

    pub fn get(&self, id: &RpcSessionId) -> Result<Arc<RpcSession>, RpcError> {
        self.sessions
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| RpcError::NotFound(id.as_str().to_string()))
    }

    pub fn list(&self) -> Vec<RpcSessionInfo> {
        self.sessions.lock().values().map(|s| s.info()).collect()
    }

    pub fn kill_all(&self) {
        let ids: Vec<RpcSessionId> = self.sessions.lock().keys().cloned().collect();
        for id in ids {
            self.kill(&id);
        }
    }
}

/// Forwards raw pty output as `RpcEvent::Event`, emits `RpcEvent::Idle` once
/// output has been quiet for `idle_after`, and `RpcEvent::Killed` on exit.
fn spawn_idle_watcher(
    id: RpcSessionId,
    session: Arc<RpcSession>,
    mut pty_events: broadcast::Receiver<PtyEvent>,
    idle_after: Duration,
    events: broadcast::Sender<(RpcSessionId, RpcEvent)>,
) {
    tokio::spawn(async move {
        let idle_timer = tokio::time::sleep(idle_after);
        tokio::pin!(idle_timer);

        loop {
            tokio::select! {
                biased;
                recv = pty_events.recv() => {
                    match recv {
                        Ok(PtyEvent::Data(chunk)) => {
                            let _ = events.send((id.clone(), RpcEvent::Event(chunk)));
                            idle_timer.as_mut().reset(tokio::time::Instant::now() + idle_after);
                        }
                        Ok(PtyEvent::Exit(_)) => {
                            session.mark_dead();
                            let _ = events.send((id.clone(), RpcEvent::Killed));
                            break;
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    }
                }
                _ = &mut idle_timer => {
                    let _ = events.send((id.clone(), RpcEvent::Idle));
                    idle_timer.as_mut().reset(tokio::time::Instant::now() + idle_after);
                }
            }
        }
    });
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
