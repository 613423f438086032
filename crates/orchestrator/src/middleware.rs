//! Middleware chain (spec.md §4.3 phase 3): a per-turn interceptor that may
//! pass, transform the prompt, block the turn, or force routing to a named
//! wrapper.

use async_trait::async_trait;
use gw_core::{ChatMessage, WrapperId};

/// Read-only context handed to each middleware in the chain.
pub struct MiddlewareContext<'a> {
    pub session_id: &'a str,
    pub history: &'a [ChatMessage],
    pub capability: &'a str,
}

/// Outcome of one middleware's decision for the current turn.
pub enum MiddlewareDecision {
    Pass,
    Transform { prompt: String },
    Block { reason: String },
    Route { agent_id: WrapperId, prompt: Option<String> },
}

#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, prompt: &str, ctx: &MiddlewareContext<'_>) -> MiddlewareDecision;
}

/// Built-in middleware recognising an `@<agentId> <rest>` prefix and
/// forcing routing to that wrapper.
pub struct AgentRouterMiddleware;

#[async_trait]
impl Middleware for AgentRouterMiddleware {
    async fn handle(&self, prompt: &str, _ctx: &MiddlewareContext<'_>) -> MiddlewareDecision {
        let Some(rest) = prompt.strip_prefix('@') else {
            return MiddlewareDecision::Pass;
        };
        let Some((agent_id, remainder)) = rest.split_once(char::is_whitespace) else {
            return MiddlewareDecision::Pass;
        };
        if agent_id.is_empty() {
            return MiddlewareDecision::Pass;
        }
        MiddlewareDecision::Route {
            agent_id: WrapperId::from_string(agent_id),
            prompt: Some(remainder.trim_start().to_string()),
        }
    }
}

/// Outcome of running the full middleware chain over one prompt.
pub enum ChainOutcome {
    Continue {
        prompt: String,
        forced_agent: Option<WrapperId>,
    },
    Blocked {
        reason: String,
    },
}

/// Runs `prompt` through `chain` in order, stopping at the first `Block` or
/// `Route` (a route still lets later transforms of the prompt apply via its
/// own `prompt` field, but stops the chain per spec.md §4.3).
pub async fn run_chain(chain: &[std::sync::Arc<dyn Middleware>], prompt: &str, ctx: &MiddlewareContext<'_>) -> ChainOutcome {
    let mut current = prompt.to_string();
    for mw in chain {
        match mw.handle(&current, ctx).await {
            MiddlewareDecision::Pass => continue,
            MiddlewareDecision::Transform { prompt } => {
                current = prompt;
            }
            MiddlewareDecision::Block { reason } => return ChainOutcome::Blocked { reason },
            MiddlewareDecision::Route { agent_id, prompt } => {
                if let Some(p) = prompt {
                    current = p;
                }
                return ChainOutcome::Continue {
                    prompt: current,
                    forced_agent: Some(agent_id),
                };
            }
        }
    }
    ChainOutcome::Continue {
        prompt: current,
        forced_agent: None,
    }
}

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;
