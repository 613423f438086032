//! Wrapper-domain errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("io error communicating with child: {0}")]
    Io(#[from] std::io::Error),
}
