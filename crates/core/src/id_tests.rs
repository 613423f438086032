use super::*;

#[test]
fn short_truncates_to_8_chars() {
    let id = WrapperId::from_string("abcdefghijklmnop");
    assert_eq!(id.short(), "abcdefgh");
}

#[test]
fn short_does_not_panic_on_tiny_id() {
    let id = WrapperId::from_string("ab");
    assert_eq!(id.short(), "ab");
}

#[test]
fn display_matches_as_str() {
    let id = SessionId::from_string("s-1");
    assert_eq!(id.to_string(), id.as_str());
}
