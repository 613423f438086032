use super::*;

#[test]
fn send_parses_with_correlation_id() {
    let msg: ClientMessage = serde_json::from_str(r#"{"type":"send","id":"s1","message":"hi"}"#).unwrap();
    assert_eq!(msg.id.as_deref(), Some("s1"));
    assert!(matches!(msg.body, ClientFrameBody::Send { message } if message == "hi"));
}

#[test]
fn pty_spawn_parses_camel_case_fields() {
    let msg: ClientMessage = serde_json::from_str(r#"{"type":"pty_spawn","agentId":"a","cmd":"ls"}"#).unwrap();
    assert!(matches!(msg.body, ClientFrameBody::PtySpawn { agent_id, cmd, .. } if agent_id == "a" && cmd == "ls"));
}

#[test]
fn unknown_type_fails_to_parse() {
    let result: Result<ClientMessage, _> = serde_json::from_str(r#"{"type":"bogus_xyz","id":"u1"}"#);
    assert!(result.is_err());
}

#[test]
fn error_frame_serializes_expected_shape() {
    let frame = ServerFrame::Error {
        id: Some("u1".to_string()),
        message: "Unknown method: bogus_xyz".to_string(),
    };
    let json: Value = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["type"], "error");
    assert_eq!(json["id"], "u1");
}
