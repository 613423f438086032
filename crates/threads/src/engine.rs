//! Thread Engine (spec.md §4.7): compiles specs, drives them through a
//! dedicated RPC session, and keeps a per-thread event log.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use gw_core::{Clock, RpcSessionId, ThreadId};
use gw_rpc::{RpcEvent, RpcSessionManager};
use parking_lot::Mutex;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::ThreadError;
use crate::spec::ThreadSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadStatus {
    Running,
    Idle,
    Error,
    Killed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadEvent {
    pub timestamp: i64,
    pub kind: String,
    pub text_delta: Option<String>,
    pub tool_name: Option<String>,
    pub raw: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadRun {
    pub id: ThreadId,
    pub session_id: RpcSessionId,
    pub thread_type: String,
    pub command: String,
    pub started_at: i64,
    pub status: ThreadStatus,
    pub events: Vec<ThreadEvent>,
}

/// Lifecycle/event notifications emitted by the engine, keyed by thread id.
#[derive(Debug, Clone)]
pub enum ThreadEngineEvent {
    Launched,
    Event(ThreadEvent),
    Idle,
    Killed,
}

pub struct ThreadEngine {
    rpc: Arc<RpcSessionManager>,
    clock: Arc<dyn Clock>,
    runs: Mutex<HashMap<ThreadId, Arc<Mutex<ThreadRun>>>>,
    events: broadcast::Sender<(ThreadId, ThreadEngineEvent)>,
}

impl ThreadEngine {
    pub fn new(rpc: Arc<RpcSessionManager>, clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(1024);
        Self {
            rpc,
            clock,
            runs: Mutex::new(HashMap::new()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<(ThreadId, ThreadEngineEvent)> {
        self.events.subscribe()
    }

    /// Mints a thread id, creates its dedicated RPC session, subscribes to
    /// its lifecycle, sends the compiled command, and emits `Launched`.
    pub fn launch(&self, spec: ThreadSpec) -> Result<ThreadId, ThreadError> {
        let thread_id = mint_thread_id(self.clock.as_ref());
        let session_id = RpcSessionId::from_string(thread_id.as_str());
        let command = spec.compile();
        let thread_type = format!("{:?}", spec.thread_type).to_lowercase();

        self.rpc.create(session_id.clone(), spec.cwd.clone())?;

        let run = Arc::new(Mutex::new(ThreadRun {
            id: thread_id.clone(),
            session_id: session_id.clone(),
            thread_type,
            command: command.clone(),
            started_at: self.clock.now_ms(),
            status: ThreadStatus::Running,
            events: Vec::new(),
        }));
        self.runs.lock().insert(thread_id.clone(), run.clone());

        self.spawn_event_bridge(thread_id.clone(), session_id.clone(), run);

        self.rpc.prompt(&session_id, &command)?;
        let _ = self.events.send((thread_id.clone(), ThreadEngineEvent::Launched));
        tracing::info!(thread_id = %thread_id, command = %command, "thread launched");
        Ok(thread_id)
    }

    fn spawn_event_bridge(&self, thread_id: ThreadId, session_id: RpcSessionId, run: Arc<Mutex<ThreadRun>>) {
        let mut rpc_events = self.rpc.subscribe();
        let clock = self.clock.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            loop {
                let (id, ev) = match rpc_events.recv().await {
                    Ok(pair) => pair,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if id != session_id {
                    continue;
                }
                match ev {
                    RpcEvent::Event(raw) => {
                        let parsed: Option<Value> = serde_json::from_str(&raw).ok();
                        let text_delta = parsed.as_ref().and_then(extract_text_delta);
                        let tool_name = parsed.as_ref().and_then(extract_tool_name);
                        let thread_event = ThreadEvent {
                            timestamp: clock.now_ms(),
                            kind: "event".to_string(),
                            text_delta,
                            tool_name,
                            raw: parsed.unwrap_or(Value::String(raw)),
                        };
                        run.lock().events.push(thread_event.clone());
                        let _ = events.send((thread_id.clone(), ThreadEngineEvent::Event(thread_event)));
                    }
                    RpcEvent::Idle => {
                        run.lock().status = ThreadStatus::Idle;
                        let _ = events.send((thread_id.clone(), ThreadEngineEvent::Idle));
                    }
                    RpcEvent::Killed => {
                        run.lock().status = ThreadStatus::Killed;
                        let _ = events.send((thread_id.clone(), ThreadEngineEvent::Killed));
                        break;
                    }
                }
            }
        });
    }

    pub fn get_thread(&self, id: &ThreadId) -> Result<ThreadRun, ThreadError> {
        self.runs
            .lock()
            .get(id)
            .map(|r| r.lock().clone())
            .ok_or_else(|| ThreadError::NotFound(id.as_str().to_string()))
    }

    pub fn list_threads(&self) -> Vec<ThreadRun> {
        self.runs.lock().values().map(|r| r.lock().clone()).collect()
    }

    pub fn kill_thread(&self, id: &ThreadId) -> Result<(), ThreadError> {
        let run = self.get_thread(id)?;
        self.rpc.kill(&run.session_id);
        Ok(())
    }

    pub fn abort_thread(&self, id: &ThreadId) -> Result<(), ThreadError> {
        let run = self.get_thread(id)?;
        self.rpc.abort(&run.session_id);
        Ok(())
    }

    /// Interrupt-and-redirect: forwards a new prompt to the running session.
    pub fn steer_thread(&self, id: &ThreadId, message: &str) -> Result<(), ThreadError> {
        let run = self.get_thread(id)?;
        self.rpc.prompt(&run.session_id, message)?;
        Ok(())
    }

    /// Removes terminated runs (killed or errored) from the map.
    pub fn clean_dead(&self) {
        self.runs
            .lock()
            .retain(|_, r| !matches!(r.lock().status, ThreadStatus::Killed | ThreadStatus::Error));
    }
}

fn mint_thread_id(clock: &dyn Clock) -> ThreadId {
    let suffix: String = {
        let mut rng = rand::thread_rng();
        (0..6).map(|_| std::char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0')).collect()
    };
    ThreadId::from_string(format!("thread-{}-{suffix}", clock.now_ms()))
}

fn extract_text_delta(value: &Value) -> Option<String> {
    value
        .get("assistantMessageEvent")?
        .get("text_delta")?
        .get("delta")?
        .as_str()
        .map(|s| s.to_string())
}

fn extract_tool_name(value: &Value) -> Option<String> {
    value.get("toolName").and_then(|v| v.as_str()).map(|s| s.to_string())
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
