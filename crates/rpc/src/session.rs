//! A single long-lived RPC session (spec.md §4.6, §3 "RPC session"):
//! one dedicated PTY running an agent in request/response mode.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gw_core::RpcSessionId;
use gw_pty::PtySessionHandle;
use serde::Serialize;

/// Events the manager forwards from an individual session.
///
/// `Event` carries a raw chunk of agent output; `Idle` fires once output has
/// been quiescent for the configured idle window; `Killed` fires once and
/// marks the session terminal.
#[derive(Debug, Clone)]
pub enum RpcEvent {
    Event(String),
    Idle,
    Killed,
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcSessionInfo {
    pub id: RpcSessionId,
    pub cwd: Option<PathBuf>,
    pub alive: bool,
    pub created_at: i64,
}

pub struct RpcSession {
    pub id: RpcSessionId,
    pub cwd: Option<PathBuf>,
    pub created_at: i64,
    pub(crate) pty: Arc<PtySessionHandle>,
    alive: AtomicBool,
}

impl RpcSession {
    pub(crate) fn new(id: RpcSessionId, cwd: Option<PathBuf>, created_at: i64, pty: Arc<PtySessionHandle>) -> Self {
        Self {
            id,
            cwd,
            created_at,
            pty,
            alive: AtomicBool::new(true),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst) && self.pty.is_alive()
    }

    pub(crate) fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    pub fn info(&self) -> RpcSessionInfo {
        RpcSessionInfo {
            id: self.id.clone(),
            cwd: self.cwd.clone(),
            alive: self.is_alive(),
            created_at: self.created_at,
        }
    }
}
