use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeamsError {
    #[error("team {0} already exists")]
    AlreadyExists(String),
    #[error("team {0} not found")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid team data: {0}")]
    Serde(#[from] serde_json::Error),
}
