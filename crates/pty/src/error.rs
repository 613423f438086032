use thiserror::Error;

#[derive(Debug, Error)]
pub enum PtyError {
    #[error("pty session {0} already exists")]
    DuplicateId(String),
    #[error("pty session {0} not found")]
    NotFound(String),
    #[error("pty session {0} is not alive")]
    Dead(String),
    #[error("pty backend error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
