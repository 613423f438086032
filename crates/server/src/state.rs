//! Shared application state handed to every handler (spec.md §4.4 "Gateway
//! state"), grounded on the donor's `AppState` (serve/app.rs) generalized
//! from a single shutdown-signal field to the full set of components wired
//! together by this crate.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gw_orchestrator::{OrchestratorRegistry, SessionOrchestrator};
use gw_pty::PtyManager;
use gw_rpc::RpcSessionManager;
use gw_teams::TeamsDriver;
use gw_threads::ThreadEngine;
use tokio::sync::broadcast;

use crate::frames::ServerFrame;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<OrchestratorRegistry>,
    pub session: Arc<SessionOrchestrator>,
    pub pty: Arc<PtyManager>,
    pub rpc: Arc<RpcSessionManager>,
    pub threads: Arc<ThreadEngine>,
    pub teams: Arc<TeamsDriver>,
    pub broadcast_tx: broadcast::Sender<ServerFrame>,
    pub auth_token: Option<String>,
    pub trust_localhost: bool,
    pub work_dir: PathBuf,
    pub clients: Arc<AtomicUsize>,
}

impl AppState {
    pub fn broadcast(&self, frame: ServerFrame) {
        let _ = self.broadcast_tx.send(frame);
    }

    pub fn client_count(&self) -> usize {
        self.clients.load(Ordering::SeqCst)
    }
}
