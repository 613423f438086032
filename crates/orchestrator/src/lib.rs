//! Orchestrator Registry and Session Orchestrator (spec.md §4.2, §4.3):
//! wrapper selection/fallback/health-caching, and the single conversational
//! session that drives turns through a middleware chain.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod error;
pub mod middleware;
pub mod persistence;
pub mod prompt;
pub mod registry;
pub mod session;

pub use error::{RegistryError, SessionError};
pub use middleware::{AgentRouterMiddleware, ChainOutcome, Middleware, MiddlewareContext, MiddlewareDecision};
pub use persistence::ChatStore;
pub use registry::OrchestratorRegistry;
pub use session::{Mode, SessionConfig, SessionEvent, SessionOrchestrator, TurnOutcome};
