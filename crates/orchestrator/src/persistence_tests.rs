use super::*;

#[tokio::test]
async fn memory_store_is_a_no_op() {
    let store = ChatStore::open(":memory:").unwrap();
    store.append(&ChatMessage::user("hi", 0)).await;
    assert!(store.load_recent().await.is_empty());
}

#[tokio::test]
async fn sqlite_store_round_trips_a_message() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let store = ChatStore::open(file.path().to_str().unwrap()).unwrap();
    let msg = ChatMessage::user("hello there", 100);
    store.append(&msg).await;
    let loaded = store.load_recent().await;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].content, "hello there");
}

#[tokio::test]
async fn sqlite_store_upserts_by_message_id() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let store = ChatStore::open(file.path().to_str().unwrap()).unwrap();
    let mut msg = ChatMessage::user("v1", 1);
    store.append(&msg).await;
    msg.content = "v2".to_string();
    store.append(&msg).await;
    let loaded = store.load_recent().await;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].content, "v2");
}

#[tokio::test]
async fn sqlite_store_orders_by_timestamp_ascending() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let store = ChatStore::open(file.path().to_str().unwrap()).unwrap();
    store.append(&ChatMessage::user("second", 20)).await;
    store.append(&ChatMessage::user("first", 10)).await;
    let loaded = store.load_recent().await;
    assert_eq!(loaded[0].content, "first");
    assert_eq!(loaded[1].content, "second");
}
