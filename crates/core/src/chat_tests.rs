use super::*;

#[test]
fn truncate_chars_leaves_short_strings_alone() {
    assert_eq!(truncate_chars("hello", 500), "hello");
}

#[test]
fn truncate_chars_cuts_long_strings() {
    let long = "a".repeat(600);
    assert_eq!(truncate_chars(&long, 500).len(), 500);
}

#[test]
fn truncated_content_respects_unicode_boundaries() {
    let msg = ChatMessage::user("é".repeat(600), 0);
    let truncated = msg.truncated_content();
    assert_eq!(truncated.chars().count(), CONTEXT_TRUNCATE_LEN);
}
