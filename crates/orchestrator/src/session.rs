//! Session Orchestrator (spec.md §4.3): a single conversational session —
//! accepts user messages, runs them through a middleware chain, selects a
//! wrapper, streams output, records history, serialises concurrent
//! requests via an internal queue.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use gw_core::task::DEFAULT_TIMEOUT;
use gw_core::{AgentResult, AgentTask, ChatMessage, Clock, SessionId, WrapperId};
use tokio::sync::{mpsc, oneshot, Mutex};

use crate::error::SessionError;
use crate::middleware::{run_chain, AgentRouterMiddleware, ChainOutcome, Middleware, MiddlewareContext};
use crate::persistence::ChatStore;
use crate::prompt::{build_final_prompt, infer_capability};
use crate::registry::OrchestratorRegistry;

/// Mirrors spec.md §3 "Session state" `mode` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Execute,
    Plan,
}

/// One session-orchestrator lifecycle event; the gateway broadcasts these
/// to every connected WS client, decorated with the on-wire type string.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    UserMessage(ChatMessage),
    Chunk { agent: String, text: String },
    AgentStart { agent: String },
    AgentEnd { agent: String },
    TurnComplete { message: ChatMessage, agent_result: AgentResult },
    Queued { queue_length: usize, preview: Vec<String> },
    Error { message: String },
}

/// Outcome of one completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub message: ChatMessage,
    pub agent_result: AgentResult,
}

impl TurnOutcome {
    fn synthetic_error(reason: &str, now_ms: i64) -> Self {
        Self {
            message: ChatMessage::assistant(format!("[error: {reason}]"), "none", 0, now_ms),
            agent_result: AgentResult::error("none", reason),
        }
    }
}

struct QueuedItem {
    text: String,
    responder: oneshot::Sender<TurnOutcome>,
}

struct InnerState {
    is_executing: bool,
    queue: VecDeque<QueuedItem>,
}

pub struct SessionConfig {
    pub work_dir: Option<PathBuf>,
    pub preferred_agents: Vec<WrapperId>,
    pub system_prompt: Option<String>,
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            work_dir: None,
            preferred_agents: Vec::new(),
            system_prompt: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct SessionOrchestrator {
    session_id: SessionId,
    registry: Arc<OrchestratorRegistry>,
    store: ChatStore,
    middleware: Vec<Arc<dyn Middleware>>,
    history: Mutex<Vec<ChatMessage>>,
    state: Mutex<InnerState>,
    mode: Mutex<Mode>,
    clock: Arc<dyn Clock>,
    config: SessionConfig,
    events: mpsc::Sender<SessionEvent>,
}

impl SessionOrchestrator {
    /// Opens the persistence layer (no-op for `:memory:`), loads history,
    /// and installs the built-in `@agentId` routing middleware ahead of any
    /// caller-supplied middleware (spec.md §4.3 `init`).
    pub async fn init(
        session_id: SessionId,
        registry: Arc<OrchestratorRegistry>,
        db_path: &str,
        mut middleware: Vec<Arc<dyn Middleware>>,
        clock: Arc<dyn Clock>,
        config: SessionConfig,
        events: mpsc::Sender<SessionEvent>,
    ) -> Result<Self, SessionError> {
        let store = ChatStore::open(db_path).map_err(|e| SessionError::Persistence(e.to_string()))?;
        let history = store.load_recent().await;
        let mut chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(AgentRouterMiddleware)];
        chain.append(&mut middleware);
        Ok(Self {
            session_id,
            registry,
            store,
            middleware: chain,
            history: Mutex::new(history),
            state: Mutex::new(InnerState {
                is_executing: false,
                queue: VecDeque::new(),
            }),
            mode: Mutex::new(Mode::Execute),
            clock,
            config,
            events,
        })
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub async fn get_history(&self) -> Vec<ChatMessage> {
        self.history.lock().await.clone()
    }

    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
    }

    pub async fn get_queue(&self) -> Vec<String> {
        self.state.lock().await.queue.iter().map(|q| q.text.clone()).collect()
    }

    /// Rejects every pending waiter with "queue cleared".
    pub async fn clear_queue(&self) {
        let mut state = self.state.lock().await;
        let now = self.clock.now_ms();
        while let Some(item) = state.queue.pop_front() {
            let _ = item.responder.send(TurnOutcome::synthetic_error("queue cleared", now));
        }
    }

    pub async fn set_mode(&self, mode: Mode) {
        *self.mode.lock().await = mode;
    }

    pub async fn mode(&self) -> Mode {
        *self.mode.lock().await
    }

    pub async fn available_agents(&self) -> Vec<WrapperId> {
        self.registry
            .available_agents()
            .await
            .iter()
            .map(|w| w.id().clone())
            .collect()
    }

    pub async fn agent_health(&self) -> std::collections::HashMap<WrapperId, bool> {
        self.registry.check_health().await
    }

    /// `processMessage` (spec.md §4.3): serialises turns; queues while busy.
    pub async fn process_message(self: &Arc<Self>, user_text: String) -> TurnOutcome {
        let mut state = self.state.lock().await;
        if state.is_executing {
            let (tx, rx) = oneshot::channel();
            state.queue.push_back(QueuedItem {
                text: user_text,
                responder: tx,
            });
            let preview = state.queue.iter().map(|q| q.text.clone()).collect();
            let queue_length = state.queue.len();
            drop(state);
            let _ = self
                .events
                .send(SessionEvent::Queued { queue_length, preview })
                .await;
            return rx
                .await
                .unwrap_or_else(|_| TurnOutcome::synthetic_error("queue cleared", self.clock.now_ms()));
        }
        state.is_executing = true;
        drop(state);

        let outcome = self.run_turn(user_text).await;
        self.drain_queue().await;
        outcome
    }

    /// Alternative streaming interface: yields raw chunks without updating
    /// history; throws (returns `Err`) rather than queueing when busy.
    pub async fn stream(self: &Arc<Self>, user_text: String) -> Result<mpsc::Receiver<String>, SessionError> {
        {
            let mut state = self.state.lock().await;
            if state.is_executing {
                return Err(SessionError::Busy);
            }
            state.is_executing = true;
        }

        let history_snapshot = self.history.lock().await.clone();
        let capability = infer_capability(&user_text).to_string();
        let constructed = build_final_prompt(self.config.system_prompt.as_deref(), &history_snapshot, &user_text);
        let mut task = AgentTask::new(constructed).with_capability(capability);
        task.timeout = self.config.timeout;
        if let Some(wd) = &self.config.work_dir {
            task.work_dir = Some(wd.clone());
        }
        let (_id, mut rx, handle) = self
            .registry
            .execute_stream(task, &self.config.preferred_agents, None)
            .await;

        let (out_tx, out_rx) = mpsc::channel(32);
        let this = self.clone();
        tokio::spawn(async move {
            while let Some(chunk) = rx.recv().await {
                if out_tx.send(chunk).await.is_err() {
                    break;
                }
            }
            let _ = handle.await;
            this.drain_queue().await;
        });
        Ok(out_rx)
    }

    async fn drain_queue(self: &Arc<Self>) {
        loop {
            let next = {
                let mut state = self.state.lock().await;
                match state.queue.pop_front() {
                    Some(item) => Some(item),
                    None => {
                        state.is_executing = false;
                        None
                    }
                }
            };
            let Some(item) = next else { break };
            let outcome = self.run_turn(item.text).await;
            let _ = item.responder.send(outcome);
        }
    }

    async fn run_turn(&self, user_text: String) -> TurnOutcome {
        let now = self.clock.now_ms();
        let user_msg = ChatMessage::user(user_text.clone(), now);
        self.history.lock().await.push(user_msg.clone());
        let _ = self.events.send(SessionEvent::UserMessage(user_msg.clone())).await;
        self.store.append(&user_msg).await;

        let capability = infer_capability(&user_text).to_string();
        let history_snapshot = self.history.lock().await.clone();
        let ctx = MiddlewareContext {
            session_id: self.session_id.as_str(),
            history: &history_snapshot,
            capability: &capability,
        };
        let outcome = run_chain(&self.middleware, &user_text, &ctx).await;

        let (final_text, forced_agent) = match outcome {
            ChainOutcome::Blocked { reason } => {
                let _ = self
                    .events
                    .send(SessionEvent::Error {
                        message: format!("blocked by middleware: {reason}"),
                    })
                    .await;
                let blocked_at = self.clock.now_ms();
                let blocked_msg = ChatMessage::assistant("[blocked by middleware]", "none", 0, blocked_at);
                self.history.lock().await.push(blocked_msg.clone());
                self.store.append(&blocked_msg).await;
                let result = AgentResult::error("none", reason);
                let _ = self
                    .events
                    .send(SessionEvent::TurnComplete {
                        message: blocked_msg.clone(),
                        agent_result: result.clone(),
                    })
                    .await;
                return TurnOutcome {
                    message: blocked_msg,
                    agent_result: result,
                };
            }
            ChainOutcome::Continue { prompt, forced_agent } => (prompt, forced_agent),
        };

        let constructed = build_final_prompt(self.config.system_prompt.as_deref(), &history_snapshot, &final_text);
        let mut task = AgentTask::new(constructed).with_capability(capability);
        task.timeout = self.config.timeout;
        if let Some(wd) = &self.config.work_dir {
            task.work_dir = Some(wd.clone());
        }

        let start = self.clock.now_ms();
        let (agent_id, mut rx, handle) = self
            .registry
            .execute_stream(task, &self.config.preferred_agents, forced_agent.as_ref())
            .await;
        let _ = self
            .events
            .send(SessionEvent::AgentStart {
                agent: agent_id.as_str().to_string(),
            })
            .await;

        let mut accumulated = String::new();
        while let Some(chunk) = rx.recv().await {
            accumulated.push_str(&chunk);
            let _ = self
                .events
                .send(SessionEvent::Chunk {
                    agent: agent_id.as_str().to_string(),
                    text: chunk,
                })
                .await;
        }
        let result = handle
            .await
            .unwrap_or_else(|_| AgentResult::error(agent_id.as_str(), "agent task join failed"));
        let _ = self
            .events
            .send(SessionEvent::AgentEnd {
                agent: agent_id.as_str().to_string(),
            })
            .await;

        let duration_ms = (self.clock.now_ms() - start).max(0) as u64;
        let content = if accumulated.is_empty() { result.output.clone() } else { accumulated };
        let assistant_msg = ChatMessage::assistant(content, agent_id.as_str(), duration_ms, self.clock.now_ms());
        self.history.lock().await.push(assistant_msg.clone());
        self.store.append(&assistant_msg).await;
        let _ = self
            .events
            .send(SessionEvent::TurnComplete {
                message: assistant_msg.clone(),
                agent_result: result.clone(),
            })
            .await;
        TurnOutcome {
            message: assistant_msg,
            agent_result: result,
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
