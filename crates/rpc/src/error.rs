use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("rpc session {0} already exists")]
    DuplicateId(String),
    #[error("rpc session {0} not found")]
    NotFound(String),
    #[error("rpc session {0} is not alive")]
    Dead(String),
    #[error(transparent)]
    Pty(#[from] gw_pty::PtyError),
}
