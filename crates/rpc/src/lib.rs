//! RPC Session Manager (spec.md §4.6): long-lived, named agent sessions
//! backed by PTYs, used as the building block for threads and teams.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod error;
pub mod manager;
pub mod session;

pub use error::RpcError;
pub use manager::{RpcSessionManager, DEFAULT_IDLE_AFTER};
pub use session::{RpcEvent, RpcSession, RpcSessionInfo};
