use super::*;

#[tokio::test]
async fn spawn_rejects_duplicate_ids() {
    let manager = PtyManager::new();
    let config = |id: &str| PtySpawnConfig {
        id: PtySessionId::from_string(id),
        agent_id: "a".to_string(),
        cmd: "echo hi".to_string(),
        cwd: None,
        env: vec![],
        cols: None,
        rows: None,
    };
    let _first = manager.spawn(config("p1")).unwrap();
    let second = manager.spawn(config("p1"));
    assert!(matches!(second, Err(PtyError::DuplicateId(_))));
}

#[tokio::test]
async fn spawn_uses_default_dimensions_when_unset() {
    let manager = PtyManager::new();
    let handle = manager
        .spawn(PtySpawnConfig {
            id: PtySessionId::from_string("p2"),
            agent_id: "a".to_string(),
            cmd: "echo hi".to_string(),
            cwd: None,
            env: vec![],
            cols: None,
            rows: None,
        })
        .unwrap();
    assert_eq!(handle.cols(), DEFAULT_COLS);
    assert_eq!(handle.rows(), DEFAULT_ROWS);
}

#[tokio::test]
async fn session_becomes_dead_after_process_exits() {
    let manager = PtyManager::new();
    let handle = manager
        .spawn(PtySpawnConfig {
            id: PtySessionId::from_string("p3"),
            agent_id: "a".to_string(),
            cmd: "true".to_string(),
            cwd: None,
            env: vec![],
            cols: None,
            rows: None,
        })
        .unwrap();
    for _ in 0..50 {
        if !handle.is_alive() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(!handle.is_alive());
}
