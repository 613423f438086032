use super::*;

#[test]
fn review_is_a_single_run_thread() {
    assert!(review("src/lib.rs").compile().starts_with("/run primary"));
}

#[test]
fn parallel_review_fuses_three_agents() {
    let spec = parallel_review("src/lib.rs");
    assert_eq!(spec.steps.len(), 3);
}

#[test]
fn plan_and_build_hands_off_an_artifact() {
    let spec = plan_and_build("the cache layer");
    assert_eq!(spec.steps.len(), 2);
    assert_eq!(spec.steps[0].output.as_deref(), Some("plan.md"));
    assert_eq!(spec.steps[1].reads, vec!["plan.md".to_string()]);
}

#[test]
fn debug_fusion_replicates_across_three_agents() {
    assert_eq!(debug_fusion("flaky test").steps.len(), 3);
}

#[test]
fn parallel_research_uses_distinct_angles() {
    let spec = parallel_research("rate limiting");
    let tasks: Vec<&str> = spec.steps.iter().map(|s| s.task.as_str()).collect();
    assert_eq!(tasks.iter().collect::<std::collections::HashSet<_>>().len(), 3);
}
