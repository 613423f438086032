use super::*;

use yare::parameterized;

#[parameterized(
    plain = {"hello", "hello"},
    spaced = {"hello world", "\"hello world\""},
    arrow = {"a->b", "\"a->b\""},
    already_quoted = {"\"already\"", "\"already\""},
    with_inner_quote = {"say \"hi\"", "\"say \\\"hi\\\"\""},
)]
fn quoting(input: &str, expected: &str) {
    assert_eq!(quote(input), expected);
}

#[test]
fn base_compiles_to_raw_task() {
    assert_eq!(ThreadSpec::base("fix the bug").compile(), "fix the bug");
}

#[test]
fn run_compiles_to_slash_run() {
    let got = ThreadSpec::run("primary", "fix the bug").compile();
    assert_eq!(got, "/run primary \"fix the bug\"");
}

#[test]
fn chain_joins_steps_with_arrow_and_renders_artifacts() {
    let spec = ThreadSpec::chain(vec![
        ThreadStep::new("primary", "plan the change").with_output("plan.md"),
        ThreadStep::new("editor", "implement the plan").with_reads(vec!["plan.md".to_string()]),
    ]);
    assert_eq!(
        spec.compile(),
        "/chain primary[output=plan.md] \"plan the change\" -> editor[reads=plan.md] \"implement the plan\""
    );
}

#[test]
fn chain_appends_no_clarify_when_skip_clarify_set() {
    let spec = ThreadSpec::chain(vec![ThreadStep::new("primary", "go")]).with_skip_clarify(true);
    assert!(spec.compile().ends_with("--no-clarify"));
}

#[test]
fn parallel_omits_artifact_handoff() {
    let spec = ThreadSpec::parallel(vec![
        ThreadStep::new("primary", "review auth").with_output("ignored.md"),
        ThreadStep::new("editor", "review db"),
    ]);
    assert_eq!(spec.compile(), "/parallel primary \"review auth\" -> editor \"review db\"");
}

#[test]
fn fusion_replicates_task_across_agents() {
    let spec = ThreadSpec::fusion(&["primary", "editor", "runner"], "find the race condition");
    assert_eq!(
        spec.compile(),
        "/parallel primary \"find the race condition\" -> editor \"find the race condition\" -> runner \"find the race condition\""
    );
}
