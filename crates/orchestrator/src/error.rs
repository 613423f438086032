//! Orchestrator-domain errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no available agent found (tried: {tried})")]
    NoAvailableAgent { tried: String },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is busy processing another turn")]
    Busy,
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("persistence error: {0}")]
    Persistence(String),
}
