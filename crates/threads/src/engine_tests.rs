use super::*;

use gw_core::FakeClock;
use gw_pty::PtyManager;
use std::time::Duration;

fn engine() -> ThreadEngine {
    let pty = Arc::new(PtyManager::new());
    let rpc = Arc::new(RpcSessionManager::new(pty, Arc::new(FakeClock::new(1_000)), "cat").with_idle_after(Duration::from_millis(50)));
    ThreadEngine::new(rpc, Arc::new(FakeClock::new(1_000)))
}

#[test]
fn mint_thread_id_has_expected_shape() {
    let clock = gw_core::SystemClock;
    let id = mint_thread_id(&clock);
    assert!(id.as_str().starts_with("thread-"));
    let suffix = id.as_str().rsplit('-').next().unwrap();
    assert_eq!(suffix.len(), 6);
}

#[tokio::test]
async fn launch_creates_a_running_thread() {
    let engine = engine();
    let id = engine.launch(ThreadSpec::base("do a thing")).unwrap();
    let run = engine.get_thread(&id).unwrap();
    assert_eq!(run.status, ThreadStatus::Running);
    assert_eq!(run.command, "do a thing");
}

#[tokio::test]
async fn kill_thread_marks_it_killed_eventually() {
    let engine = engine();
    let id = engine.launch(ThreadSpec::base("do a thing")).unwrap();
    engine.kill_thread(&id).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    let run = engine.get_thread(&id).unwrap();
    assert_eq!(run.status, ThreadStatus::Killed);
}

#[tokio::test]
async fn clean_dead_removes_killed_runs() {
    let engine = engine();
    let id = engine.launch(ThreadSpec::base("do a thing")).unwrap();
    engine.kill_thread(&id).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    engine.clean_dead();
    assert!(engine.get_thread(&id).is_err());
}

#[test]
fn get_thread_errors_on_unknown_id() {
    let engine = engine();
    assert!(engine.get_thread(&ThreadId::from_string("nope")).is_err());
}
