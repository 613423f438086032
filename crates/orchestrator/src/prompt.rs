//! Capability inference and final-prompt construction (spec.md §4.3 phases
//! 2 and the `AgentTask` build step).

use gw_core::chat::{CONTEXT_WINDOW_MESSAGES, Role};
use gw_core::ChatMessage;

/// Case-insensitive keyword rules mapping a user prompt to an inferred
/// capability tag, checked in order; first match wins.
const RULES: &[(&[&str], &str)] = &[
    (&["bug", "fix", "error"], "bug-fixing"),
    (&["refactor", "clean", "simplify"], "refactoring"),
    (&["test", "spec", "coverage"], "testing"),
    (&["document", "readme", "explain"], "explanation"),
    (&["git", "commit", "pr"], "git-aware"),
    (&["multi-file", "across", "project-wide"], "multi-file"),
];

pub const DEFAULT_CAPABILITY: &str = "code-generation";

/// Infers a capability tag from the prompt text (spec.md §4.3 phase 2).
pub fn infer_capability(prompt: &str) -> &'static str {
    let lower = prompt.to_lowercase();
    for (keywords, capability) in RULES {
        if keywords.iter().any(|k| lower.contains(k)) {
            return capability;
        }
    }
    DEFAULT_CAPABILITY
}

/// Builds the final prompt sent to the wrapper: optional system prompt,
/// then up to the last [`CONTEXT_WINDOW_MESSAGES`] history entries as
/// truncated context, then the user's final prompt.
pub fn build_final_prompt(system_prompt: Option<&str>, history: &[ChatMessage], final_prompt: &str) -> String {
    let mut sections = Vec::new();
    if let Some(sys) = system_prompt {
        if !sys.is_empty() {
            sections.push(sys.to_string());
        }
    }

    let window_start = history.len().saturating_sub(CONTEXT_WINDOW_MESSAGES);
    let recent = &history[window_start..];
    if !recent.is_empty() {
        let mut block = String::from("Recent conversation:");
        for msg in recent {
            block.push('\n');
            block.push_str(msg.role.label());
            block.push_str(": ");
            block.push_str(&msg.truncated_content());
        }
        sections.push(block);
    }

    sections.push(format!("{}: {}", Role::User.label(), final_prompt));
    sections.join("\n\n")
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
