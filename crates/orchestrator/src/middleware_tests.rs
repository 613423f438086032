use super::*;

fn ctx<'a>() -> MiddlewareContext<'a> {
    MiddlewareContext {
        session_id: "s1",
        history: &[],
        capability: "code-generation",
    }
}

#[tokio::test]
async fn agent_router_passes_through_plain_prompt() {
    let mw = AgentRouterMiddleware;
    match mw.handle("fix the bug", &ctx()).await {
        MiddlewareDecision::Pass => {}
        _ => panic!("expected pass"),
    }
}

#[tokio::test]
async fn agent_router_routes_at_prefixed_prompt() {
    let mw = AgentRouterMiddleware;
    match mw.handle("@claude fix the bug", &ctx()).await {
        MiddlewareDecision::Route { agent_id, prompt } => {
            assert_eq!(agent_id.as_str(), "claude");
            assert_eq!(prompt.as_deref(), Some("fix the bug"));
        }
        _ => panic!("expected route"),
    }
}

#[tokio::test]
async fn run_chain_stops_on_block() {
    struct Blocker;
    #[async_trait]
    impl Middleware for Blocker {
        async fn handle(&self, _: &str, _: &MiddlewareContext<'_>) -> MiddlewareDecision {
            MiddlewareDecision::Block {
                reason: "nope".to_string(),
            }
        }
    }
    let chain: Vec<std::sync::Arc<dyn Middleware>> = vec![std::sync::Arc::new(Blocker)];
    match run_chain(&chain, "hi", &ctx()).await {
        ChainOutcome::Blocked { reason } => assert_eq!(reason, "nope"),
        _ => panic!("expected blocked"),
    }
}

#[tokio::test]
async fn run_chain_applies_built_in_router() {
    let chain: Vec<std::sync::Arc<dyn Middleware>> = vec![std::sync::Arc::new(AgentRouterMiddleware)];
    match run_chain(&chain, "@claude hi there", &ctx()).await {
        ChainOutcome::Continue { prompt, forced_agent } => {
            assert_eq!(prompt, "hi there");
            assert_eq!(forced_agent.unwrap().as_str(), "claude");
        }
        _ => panic!("expected continue"),
    }
}
