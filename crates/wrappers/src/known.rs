//! The registry of concrete wrappers (spec.md §4.1: "a configuration
//! detail"; §4.2: "a convenience constructor registers the full known set,
//! in a fixed order"). One designated wrapper is placed first so its
//! preferred-agent index makes it the default pick.

use gw_core::WrapperId;

use crate::argv;
use crate::wrapper::{BasicWrapper, HangingVersionWrapper, Wrapper};

fn basic(id: &str, name: &str, binary: &str, capabilities: &[&str], argv_builder: argv::ArgvBuilder) -> BasicWrapper {
    BasicWrapper {
        id: WrapperId::from_string(id),
        name: name.to_string(),
        binary: binary.to_string(),
        capabilities: capabilities.iter().map(|s| s.to_string()).collect(),
        argv_builder,
    }
}

/// Builds the full known wrapper set, in the fixed order the designated
/// in-process agent is expected to be selected by default: first in the
/// list, first in `preferredAgents` when unconfigured.
pub fn known_wrappers() -> Vec<Box<dyn Wrapper>> {
    vec![
        // Designated in-process agent: placed first.
        Box::new(basic(
            "primary",
            "Primary Agent",
            "primary-agent",
            &["code-generation", "refactoring", "multi-file", "git-aware"],
            argv::print_prompt,
        )),
        Box::new(basic(
            "editor",
            "Editor Agent",
            "editor-agent",
            &["refactoring", "multi-file"],
            argv::message_with_files,
        )),
        Box::new(basic(
            "runner",
            "Runner Agent",
            "runner-agent",
            &["code-generation"],
            argv::run_prompt,
        )),
        Box::new(basic(
            "autopilot",
            "Autopilot Agent",
            "autopilot-agent",
            &["code-generation", "multi-file"],
            argv::exec_full_auto,
        )),
        Box::new(HangingVersionWrapper::new(basic(
            "banner",
            "Banner Agent",
            "banner-agent",
            &["code-generation"],
            argv::p_prompt_yolo,
        ))),
        Box::new(basic(
            "texter",
            "Texter Agent",
            "texter-agent",
            &["explanation"],
            argv::run_text,
        )),
        Box::new(basic(
            "background",
            "Background Agent",
            "background-agent",
            &["testing"],
            argv::tell_bg,
        )),
        Box::new(basic(
            "problem-solver",
            "Problem Solver Agent",
            "problem-solver-agent",
            &["bug-fixing"],
            argv::run_problem_statement,
        )),
        Box::new(basic(
            "quiet-runner",
            "Quiet Runner Agent",
            "quiet-runner-agent",
            &["code-generation"],
            argv::run_quiet_cwd,
        )),
        Box::new(basic(
            "batch",
            "Batch Agent",
            "batch-agent",
            &["code-generation"],
            argv::non_interactive,
        )),
        Box::new(basic(
            "chat",
            "Chat Agent",
            "chat-agent",
            &["explanation"],
            argv::chat,
        )),
        Box::new(basic(
            "structured",
            "Structured Agent",
            "structured-agent",
            &["testing", "git-aware"],
            argv::ask_json,
        )),
    ]
}

#[cfg(test)]
#[path = "known_tests.rs"]
mod tests;
