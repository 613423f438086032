use super::*;

use crate::argv::print_prompt;

fn wrapper() -> BasicWrapper {
    BasicWrapper {
        id: WrapperId::from_string("echo-agent"),
        name: "Echo Agent".to_string(),
        binary: "echo".to_string(),
        capabilities: vec!["code-generation".to_string()],
        argv_builder: print_prompt,
    }
}

#[tokio::test]
async fn execute_uses_the_configured_argv_builder() {
    let w = wrapper();
    let task = AgentTask::new("hello");
    let result = w.execute(&task).await;
    assert!(result.output.contains("--print"));
    assert!(result.output.contains("hello"));
}

#[tokio::test]
async fn health_is_false_for_a_binary_with_no_version_output() {
    let w = BasicWrapper {
        id: WrapperId::from_string("missing"),
        name: "Missing".to_string(),
        binary: "/no/such/binary-xyz".to_string(),
        capabilities: vec![],
        argv_builder: print_prompt,
    };
    assert!(!w.health().await);
}
