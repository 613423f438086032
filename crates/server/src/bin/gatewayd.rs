//! `gatewayd`: binds the HTTP+WS gateway described in this crate's `lib.rs`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use clap::Parser;
use gw_core::{SessionId, SystemClock, WrapperId};
use gw_orchestrator::{OrchestratorRegistry, SessionConfig, SessionOrchestrator};
use gw_pty::PtyManager;
use gw_rpc::RpcSessionManager;
use gw_server::{router, AppState, GatewayConfig};
use gw_teams::{default_base_dir, TeamsDriver};
use gw_threads::ThreadEngine;
use tokio::sync::{broadcast, mpsc};

/// Binary that backs both long-lived RPC sessions and the team coordinator
/// process: the same designated in-process agent the orchestrator prefers
/// by default (`gw-wrappers::known_wrappers`'s `primary-agent`).
const AGENT_RPC_COMMAND: &str = "primary-agent --rpc";
const TEAM_COORDINATOR_COMMAND: &str = "primary-agent";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::parse();

    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let work_dir = config.work_dir.clone().unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let clock = Arc::new(SystemClock);

    let registry = Arc::new(OrchestratorRegistry::with_known_wrappers(clock.clone()));
    let preferred_agents: Vec<WrapperId> = config.agents.iter().map(|a| WrapperId::from_string(a.clone())).collect();

    let (session_tx, session_rx) = mpsc::channel(256);
    let session = Arc::new(
        SessionOrchestrator::init(
            SessionId::new(),
            registry.clone(),
            &config.db,
            vec![],
            clock.clone(),
            SessionConfig {
                work_dir: Some(work_dir.clone()),
                preferred_agents,
                system_prompt: None,
                timeout: gw_core::task::DEFAULT_TIMEOUT,
            },
            session_tx,
        )
        .await?,
    );

    let pty = Arc::new(PtyManager::new());
    let rpc = Arc::new(RpcSessionManager::new(pty.clone(), clock.clone(), AGENT_RPC_COMMAND));
    let threads = Arc::new(ThreadEngine::new(rpc.clone(), clock.clone()));
    let teams = Arc::new(TeamsDriver::new(default_base_dir(), clock.clone(), TEAM_COORDINATOR_COMMAND));

    let (broadcast_tx, _) = broadcast::channel(1024);
    let state = AppState {
        registry,
        session,
        pty,
        rpc: rpc.clone(),
        threads: threads.clone(),
        teams: teams.clone(),
        broadcast_tx,
        auth_token: config.auth_token.clone(),
        trust_localhost: config.trust_localhost,
        work_dir: work_dir.clone(),
        clients: Arc::new(AtomicUsize::new(0)),
    };

    gw_server::broadcaster::spawn_session_bridge(state.clone(), session_rx, work_dir);
    gw_server::broadcaster::spawn_rpc_bridge(state.clone(), rpc.subscribe());
    gw_server::broadcaster::spawn_thread_bridge(state.clone(), threads.subscribe());
    gw_server::broadcaster::spawn_teams_bridge(state.clone(), teams.subscribe());

    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(%addr, "gatewayd listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
