use super::*;

fn task(status: TaskStatus) -> TeamTask {
    TeamTask {
        id: "t".to_string(),
        subject: "s".to_string(),
        description: "d".to_string(),
        status,
        owner: None,
        blocked_by: vec![],
        blocks: vec![],
        created_at: 0,
        updated_at: 0,
    }
}

#[test]
fn progress_is_zero_when_no_tasks() {
    let p = compute_progress(&[]);
    assert_eq!((p.completed, p.total, p.pct), (0, 0, 0));
}

#[test]
fn progress_excludes_deleted_from_denominator() {
    let tasks = vec![
        task(TaskStatus::Completed),
        task(TaskStatus::InProgress),
        task(TaskStatus::Pending),
    ];
    let p = compute_progress(&tasks);
    assert_eq!((p.completed, p.total, p.pct), (1, 3, 33));
}

#[test]
fn progress_ignores_deleted_tasks_entirely() {
    let tasks = vec![task(TaskStatus::Completed), task(TaskStatus::Deleted)];
    let p = compute_progress(&tasks);
    assert_eq!((p.completed, p.total, p.pct), (1, 1, 100));
}
