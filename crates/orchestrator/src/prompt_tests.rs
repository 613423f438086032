use super::*;

use yare::parameterized;

#[parameterized(
    bug = { "there's a bug in auth", "bug-fixing" },
    fix = { "please fix this", "bug-fixing" },
    refactor = { "refactor this module", "refactoring" },
    test_kw = { "add test coverage", "testing" },
    document = { "document the README", "explanation" },
    git_kw = { "prepare a commit", "git-aware" },
    multi_file = { "a project-wide rename", "multi-file" },
    fallback = { "write a new widget", "code-generation" },
)]
fn infer_capability_matches_keyword_rules(prompt: &str, expected: &str) {
    assert_eq!(infer_capability(prompt), expected);
}

#[test]
fn infer_capability_is_case_insensitive() {
    assert_eq!(infer_capability("FIX THE BUG"), "bug-fixing");
}

#[test]
fn build_final_prompt_with_no_history_or_system_prompt() {
    let out = build_final_prompt(None, &[], "hello");
    assert_eq!(out, "User: hello");
}

#[test]
fn build_final_prompt_includes_system_prompt_and_recent_context() {
    let history = vec![
        ChatMessage::user("first", 0),
        ChatMessage::assistant("reply", "a", 10, 1),
    ];
    let out = build_final_prompt(Some("You are helpful."), &history, "next question");
    assert!(out.starts_with("You are helpful."));
    assert!(out.contains("Recent conversation:"));
    assert!(out.contains("User: first"));
    assert!(out.contains("Assistant: reply"));
    assert!(out.ends_with("User: next question"));
}

#[test]
fn build_final_prompt_caps_context_window() {
    let history: Vec<ChatMessage> = (0..10).map(|i| ChatMessage::user(format!("m{i}"), i)).collect();
    let out = build_final_prompt(None, &history, "final");
    assert!(!out.contains("m0"));
    assert!(out.contains("m9"));
}
