//! Gateway (spec.md §4.4): axum HTTP + WebSocket multiplexer in front of the
//! session orchestrator, PTY manager, RPC session manager, thread engine,
//! and teams driver.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod auth;
pub mod broadcaster;
pub mod config;
pub mod diff;
pub mod dispatch;
pub mod error;
pub mod frames;
pub mod http;
pub mod router;
pub mod sender;
pub mod state;
pub mod ws;

pub use config::GatewayConfig;
pub use error::ServerError;
pub use router::router;
pub use state::AppState;
