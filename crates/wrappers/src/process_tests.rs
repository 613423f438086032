use super::*;

#[tokio::test]
async fn execute_reports_spawn_error_for_missing_binary() {
    let task = AgentTask::new("hi");
    let result = execute("a", "/no/such/binary-xyz", &["--print".into()], &task).await;
    assert_eq!(result.status, AgentStatus::Error);
    assert!(result.stderr.unwrap().contains("failed to spawn"));
}

#[tokio::test]
async fn execute_captures_stdout_of_successful_command() {
    let task = AgentTask::new("hi");
    let result = execute("a", "echo", &["hello-world".into()], &task).await;
    assert_eq!(result.status, AgentStatus::Success);
    assert!(result.output.contains("hello-world"));
    assert_eq!(result.exit_code, Some(0));
}

#[tokio::test]
async fn execute_times_out_and_sends_sigterm() {
    let mut task = AgentTask::new("hi");
    task.timeout = Duration::from_millis(50);
    let result = execute("a", "sleep", &["5".into()], &task).await;
    assert_eq!(result.status, AgentStatus::Timeout);
}

#[tokio::test]
async fn probe_version_returns_none_for_missing_binary() {
    assert!(probe_version("/no/such/binary-xyz", Duration::from_secs(1))
        .await
        .is_none());
}

#[tokio::test]
async fn probe_version_returns_first_line() {
    // `echo --version` just echoes the literal argument back.
    let got = probe_version("echo", Duration::from_secs(1)).await;
    assert_eq!(got.as_deref(), Some("--version"));
}
