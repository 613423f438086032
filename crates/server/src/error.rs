use thiserror::Error;

/// Handler-level errors (spec.md §4.4 "Dispatch"): these never unwind across
/// the WS dispatch boundary, they are converted to an `error` frame instead.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Pty(#[from] gw_pty::PtyError),
    #[error(transparent)]
    Rpc(#[from] gw_rpc::RpcError),
    #[error(transparent)]
    Thread(#[from] gw_threads::ThreadError),
    #[error(transparent)]
    Teams(#[from] gw_teams::TeamsError),
    #[error(transparent)]
    Session(#[from] gw_orchestrator::SessionError),
}
