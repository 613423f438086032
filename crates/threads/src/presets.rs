//! Fixed library of thread templates for common workflows (spec.md §4.7
//! "Preset specs"). Each is a pure function from a target string to a
//! `ThreadSpec`.

use crate::spec::{ThreadSpec, ThreadStep};

/// Single-agent review of `target`.
pub fn review(target: &str) -> ThreadSpec {
    ThreadSpec::run("primary", format!("Review {target} for correctness, style and security issues."))
}

/// Three agents independently review the same target for fusion.
pub fn parallel_review(target: &str) -> ThreadSpec {
    ThreadSpec::fusion(
        &["primary", "editor", "structured"],
        format!("Review {target} and report any bugs, readability issues, or risky patterns."),
    )
}

/// Plan with one agent, hand the plan artifact to another to implement.
pub fn plan_and_build(target: &str) -> ThreadSpec {
    ThreadSpec::chain(vec![
        ThreadStep::new("primary", format!("Produce an implementation plan for {target}.")).with_output("plan.md"),
        ThreadStep::new("editor", format!("Implement {target} following the plan.")).with_reads(vec!["plan.md".to_string()]),
    ])
}

/// Several agents independently debug the same failure for fusion.
pub fn debug_fusion(target: &str) -> ThreadSpec {
    ThreadSpec::fusion(
        &["primary", "problem-solver", "runner"],
        format!("Diagnose and propose a fix for: {target}"),
    )
}

/// Several agents research the same topic from independent angles.
pub fn parallel_research(target: &str) -> ThreadSpec {
    ThreadSpec::parallel(vec![
        ThreadStep::new("primary", format!("Research {target} from an implementation-feasibility angle.")),
        ThreadStep::new("texter", format!("Research {target} from a prior-art and documentation angle.")),
        ThreadStep::new("structured", format!("Research {target} from a risk and edge-case angle.")),
    ])
}

#[cfg(test)]
#[path = "presets_tests.rs"]
mod tests;
