use super::*;

#[tokio::test]
async fn returns_none_outside_a_git_repo() {
    let dir = tempfile::tempdir().unwrap();
    assert!(get_git_diff(dir.path(), false).await.is_none());
}
