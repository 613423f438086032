use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("thread {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Rpc(#[from] gw_rpc::RpcError),
}
