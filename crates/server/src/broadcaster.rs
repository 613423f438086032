//! Background bridges that decorate each component's native event stream
//! into a [`ServerFrame`] and fan it out to every connected WS client,
//! grounded on the donor's reader-thread stdout-forwarding idiom
//! (`gw-wrappers/src/process.rs`) generalized from one child process to
//! five independently-subscribed broadcast channels.

use std::path::PathBuf;
use std::sync::Arc;

use gw_orchestrator::SessionEvent;
use gw_pty::{PtyEvent, PtySessionHandle};
use gw_rpc::RpcEvent;
use gw_teams::TeamsEvent;
use gw_threads::ThreadEngineEvent;
use serde_json::json;
use tokio::sync::{broadcast, mpsc};

use crate::frames::ServerFrame;
use crate::state::AppState;

/// Forwards one PTY session's raw output/exit as `pty_data`/`pty_exit`.
pub fn spawn_pty_bridge(state: AppState, id: gw_core::PtySessionId, handle: Arc<PtySessionHandle>) {
    let mut events = handle.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(PtyEvent::Data(data)) => state.broadcast(ServerFrame::PtyData {
                    id: id.as_str().to_string(),
                    data,
                }),
                Ok(PtyEvent::Exit(code)) => {
                    state.broadcast(ServerFrame::PtyExit {
                        id: id.as_str().to_string(),
                        code,
                    });
                    break;
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

/// Consumes the session orchestrator's turn-lifecycle events, rebroadcasts
/// them, and appends an automatic `diff` (stat form) after every turn
/// (spec.md §4.4 "after every turn_complete, broadcast a diff").
pub fn spawn_session_bridge(state: AppState, mut events: mpsc::Receiver<SessionEvent>, work_dir: PathBuf) {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let is_turn_complete = matches!(event, SessionEvent::TurnComplete { .. });
            state.broadcast(session_event_to_frame(event));
            if is_turn_complete {
                let diff = crate::diff::get_git_diff(&work_dir, false).await;
                state.broadcast(ServerFrame::Diff { diff });
            }
        }
    });
}

fn session_event_to_frame(event: SessionEvent) -> ServerFrame {
    match event {
        SessionEvent::UserMessage(msg) => ServerFrame::UserMessage { message: json!(msg) },
        SessionEvent::Chunk { agent, text } => ServerFrame::Chunk { agent, text },
        SessionEvent::AgentStart { agent } => ServerFrame::AgentStart { agent },
        SessionEvent::AgentEnd { agent } => ServerFrame::AgentEnd { agent },
        SessionEvent::TurnComplete { message, .. } => ServerFrame::TurnComplete { message: json!(message) },
        SessionEvent::Queued { queue_length, preview } => ServerFrame::Queued { queue_length, preview },
        SessionEvent::Error { message } => ServerFrame::Error { id: None, message },
    }
}

pub fn spawn_rpc_bridge(state: AppState, mut events: broadcast::Receiver<(gw_core::RpcSessionId, RpcEvent)>) {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok((id, RpcEvent::Event(data))) => state.broadcast(ServerFrame::RpcEvent {
                    id: id.as_str().to_string(),
                    data,
                }),
                Ok((id, RpcEvent::Idle)) => state.broadcast(ServerFrame::RpcIdle { id: id.as_str().to_string() }),
                Ok((id, RpcEvent::Killed)) => state.broadcast(ServerFrame::RpcKilled { id: id.as_str().to_string() }),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

pub fn spawn_thread_bridge(state: AppState, mut events: broadcast::Receiver<(gw_core::ThreadId, ThreadEngineEvent)>) {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok((_, ThreadEngineEvent::Launched)) => {}
                Ok((id, ThreadEngineEvent::Event(ev))) => state.broadcast(ServerFrame::ThreadEvent {
                    thread_id: id.as_str().to_string(),
                    event: json!(ev),
                }),
                Ok((id, ThreadEngineEvent::Idle)) => state.broadcast(ServerFrame::ThreadIdle { thread_id: id.as_str().to_string() }),
                Ok((id, ThreadEngineEvent::Killed)) => state.broadcast(ServerFrame::ThreadKilled { thread_id: id.as_str().to_string() }),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

pub fn spawn_teams_bridge(state: AppState, mut events: broadcast::Receiver<TeamsEvent>) {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(TeamsEvent::TeamCreated(config)) => state.broadcast(ServerFrame::TeamsCreated { team: json!(config) }),
                Ok(TeamsEvent::TaskCreated(task)) => state.broadcast(ServerFrame::TeamsTask { task: json!(task) }),
                Ok(TeamsEvent::TaskUpdated(task)) => state.broadcast(ServerFrame::TeamsTask { task: json!(task) }),
                Ok(TeamsEvent::MessageSent(msg)) => state.broadcast(ServerFrame::TeamsMessage { message: json!(msg) }),
                Ok(TeamsEvent::TasksChanged { team }) => {
                    let tasks = state.teams.get_tasks(&team).into_iter().map(|t| json!(t)).collect();
                    state.broadcast(ServerFrame::TeamsTasks { team, tasks });
                }
                Ok(TeamsEvent::TeamOutput { team, line }) => state.broadcast(ServerFrame::TeamsOutput { team, line }),
                Ok(TeamsEvent::TeamStderr { team, line }) => state.broadcast(ServerFrame::TeamsOutput { team, line }),
                Ok(TeamsEvent::TeamExit { team, code }) => state.broadcast(ServerFrame::TeamsExit { team, code }),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}
