use super::*;

use gw_core::SystemClock;

fn manager() -> RpcSessionManager {
    RpcSessionManager::new(Arc::new(PtyManager::new()), Arc::new(SystemClock), "cat")
        .with_idle_after(Duration::from_millis(100))
}

#[tokio::test]
async fn create_rejects_duplicate_ids() {
    let mgr = manager();
    mgr.create(RpcSessionId::from_string("r1"), None).unwrap();
    let second = mgr.create(RpcSessionId::from_string("r1"), None);
    assert!(matches!(second, Err(RpcError::DuplicateId(_))));
}

#[tokio::test]
async fn prompt_on_unknown_session_errors() {
    let mgr = manager();
    let err = mgr.prompt(&RpcSessionId::from_string("nope"), "hi");
    assert!(matches!(err, Err(RpcError::NotFound(_))));
}

#[tokio::test]
async fn abort_and_kill_are_noops_on_unknown_id() {
    let mgr = manager();
    mgr.abort(&RpcSessionId::from_string("nope"));
    mgr.kill(&RpcSessionId::from_string("nope"));
}

#[tokio::test]
async fn kill_marks_session_dead_and_emits_event() {
    let mgr = manager();
    let id = RpcSessionId::from_string("r2");
    mgr.create(id.clone(), None).unwrap();
    let mut sub = mgr.subscribe();
    mgr.kill(&id);
    let info = mgr.list();
    assert!(!info.iter().find(|s| s.id == id).unwrap().alive);
    let (_, ev) = sub.recv().await.unwrap();
    assert!(matches!(ev, RpcEvent::Killed) || matches!(ev, RpcEvent::Event(_)));
}

#[tokio::test]
async fn idle_fires_after_quiescence() {
    let mgr = manager();
    let id = RpcSessionId::from_string("r3");
    mgr.create(id.clone(), None).unwrap();
    let mut sub = mgr.subscribe();
    let mut saw_idle = false;
    for _ in 0..20 {
        if let Ok(Ok((_, RpcEvent::Idle))) = tokio::time::timeout(Duration::from_millis(200), sub.recv()).await {
            saw_idle = true;
            break;
        }
    }
    assert!(saw_idle);
}
