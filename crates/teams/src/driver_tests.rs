use super::*;
use crate::config::AgentType;
use gw_core::FakeClock;
use tempfile::tempdir;

fn driver() -> (tempfile::TempDir, TeamsDriver) {
    let dir = tempdir().unwrap();
    let driver = TeamsDriver::new(dir.path().to_path_buf(), Arc::new(FakeClock::new(1_000)), "true");
    (dir, driver)
}

#[test]
fn create_team_writes_config_and_dirs() {
    let (_dir, driver) = driver();
    let members = vec![TeamMember::new("a", "a", AgentType::TeamReviewer)];
    let config = driver.create_team("t1", members).unwrap();
    assert_eq!(config.team_name, "t1");
    assert!(driver.team_dir("t1").join("inbox").is_dir());
    assert!(driver.team_tasks_dir("t1").is_dir());
}

#[test]
fn create_team_rejects_duplicate_name() {
    let (_dir, driver) = driver();
    let members = vec![TeamMember::new("a", "a", AgentType::TeamReviewer)];
    driver.create_team("t1", members.clone()).unwrap();
    let err = driver.create_team("t1", members).unwrap_err();
    assert!(matches!(err, TeamsError::AlreadyExists(name) if name == "t1"));
}

#[test]
fn preset_name_matches_expected_pattern() {
    let (_dir, driver) = driver();
    let config = driver.create_team_from_preset(TeamPreset::Review, None).unwrap();
    assert!(config.team_name.starts_with("review-team-"));
}

#[test]
fn get_tasks_skips_malformed_files() {
    let (_dir, driver) = driver();
    driver.create_team("t1", vec![]).unwrap();
    std::fs::write(driver.team_tasks_dir("t1").join("bad.json"), "{ not json").unwrap();
    driver.create_task("t1", TaskPartial::default()).unwrap();
    assert_eq!(driver.get_tasks("t1").len(), 1);
}

#[test]
fn task_progress_matches_scenario_9() {
    let (_dir, driver) = driver();
    driver.create_team("t1", vec![]).unwrap();
    let statuses = [TaskStatus::Completed, TaskStatus::InProgress, TaskStatus::Pending];
    for status in statuses {
        driver
            .create_task(
                "t1",
                TaskPartial {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .unwrap();
    }
    let state = driver.get_team_state("t1").unwrap();
    assert_eq!((state.progress.completed, state.progress.total, state.progress.pct), (1, 3, 33));
}

#[test]
fn update_task_returns_none_when_missing() {
    let (_dir, driver) = driver();
    driver.create_team("t1", vec![]).unwrap();
    let result = driver.update_task("t1", "nope", TaskPartial::default()).unwrap();
    assert!(result.is_none());
}

#[test]
fn broadcast_writes_to_every_member_but_sender() {
    let (_dir, driver) = driver();
    let members = vec![
        TeamMember::new("a", "a", AgentType::TeamLead),
        TeamMember::new("b", "b", AgentType::TeamReviewer),
    ];
    driver.create_team("t1", members).unwrap();
    driver.broadcast("t1", "a", "status update", None).unwrap();
    assert!(driver.team_dir("t1").join("inbox/b").read_dir().unwrap().count() == 1);
    let a_inbox = driver.team_dir("t1").join("inbox/a");
    assert!(!a_inbox.exists() || a_inbox.read_dir().unwrap().count() == 0);
}
