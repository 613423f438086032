use super::*;

use gw_core::FakeClock;
use gw_wrappers::BasicWrapper;

fn wrapper(id: &str, binary: &str, capabilities: &[&str]) -> Arc<dyn Wrapper> {
    Arc::new(BasicWrapper {
        id: WrapperId::from_string(id),
        name: id.to_string(),
        binary: binary.to_string(),
        capabilities: capabilities.iter().map(|s| s.to_string()).collect(),
        argv_builder: gw_wrappers::argv::print_prompt,
    })
}

fn registry() -> OrchestratorRegistry {
    OrchestratorRegistry::new(Arc::new(FakeClock::new(0)))
}

#[tokio::test]
async fn select_for_task_picks_first_healthy_in_registration_order() {
    let mut r = registry();
    r.register(wrapper("a", "echo", &[]));
    r.register(wrapper("b", "echo", &[]));
    let task = AgentTask::new("hi");
    let selected = r.select_for_task(&task, &[]).await.unwrap();
    assert_eq!(selected.id().as_str(), "a");
}

#[tokio::test]
async fn select_for_task_honours_preferred_order() {
    let mut r = registry();
    r.register(wrapper("a", "echo", &[]));
    r.register(wrapper("b", "echo", &[]));
    let task = AgentTask::new("hi");
    let preferred = vec![WrapperId::from_string("b"), WrapperId::from_string("a")];
    let selected = r.select_for_task(&task, &preferred).await.unwrap();
    assert_eq!(selected.id().as_str(), "b");
}

#[tokio::test]
async fn select_for_task_honours_capability_hint_over_registration_order() {
    let mut r = registry();
    r.register(wrapper("a", "echo", &[]));
    r.register(wrapper("b", "echo", &["bug-fixing"]));
    let task = AgentTask::new("hi").with_capability("bug-fixing");
    let selected = r.select_for_task(&task, &[]).await.unwrap();
    assert_eq!(selected.id().as_str(), "b");
}

#[tokio::test]
async fn select_for_task_returns_none_when_nothing_is_healthy() {
    let mut r = registry();
    r.register(wrapper("a", "/no/such/binary-xyz", &[]));
    let task = AgentTask::new("hi");
    assert!(r.select_for_task(&task, &[]).await.is_none());
}

#[tokio::test]
async fn unregister_drops_wrapper_and_invalidates_cache() {
    let mut r = registry();
    r.register(wrapper("a", "echo", &[]));
    let id = WrapperId::from_string("a");
    r.is_healthy_id(&id).await;
    r.unregister(&id);
    assert!(r.get_wrapper(&id).is_none());
    assert!(r.health_cache.lock().get(&id).is_none());
}

#[tokio::test]
async fn execute_falls_back_to_next_candidate_on_failure() {
    // scenario 10: A preferred but its binary is missing; B is healthy
    // and succeeds. Health is force-seeded so both are "healthy" at the
    // registry level (A's failure surfaces only at execute time).
    let mut r = registry();
    r.register(wrapper("a", "/no/such/binary-xyz", &[]));
    r.register(wrapper("b", "echo", &[]));
    r.force_health(&WrapperId::from_string("a"), true);
    r.force_health(&WrapperId::from_string("b"), true);
    let task = AgentTask::new("hi");
    let preferred = vec![WrapperId::from_string("a"), WrapperId::from_string("b")];
    let result = r.execute(&task, &preferred, None).await;
    assert_eq!(result.agent_id, "b");
    assert_eq!(result.status, AgentStatus::Success);
}

#[tokio::test]
async fn execute_reports_no_available_agent_when_all_unhealthy() {
    let mut r = registry();
    r.register(wrapper("a", "/no/such/binary-xyz", &[]));
    let task = AgentTask::new("hi");
    let result = r.execute(&task, &[], None).await;
    assert_eq!(result.status, AgentStatus::Error);
    assert!(result.stderr.unwrap().contains("no available agent found"));
}

#[tokio::test]
async fn execute_honours_forced_wrapper_bypassing_fallback() {
    let mut r = registry();
    r.register(wrapper("a", "/no/such/binary-xyz", &[]));
    r.register(wrapper("b", "echo", &[]));
    let task = AgentTask::new("hi");
    let forced = WrapperId::from_string("a");
    let result = r.execute(&task, &[], Some(&forced)).await;
    assert_eq!(result.agent_id, "a");
    assert_eq!(result.status, AgentStatus::Error);
}
