use super::*;

use yare::parameterized;

#[parameterized(
    print_prompt = { print_prompt as ArgvBuilder, vec!["--print", "hi"] },
    run_prompt = { run_prompt as ArgvBuilder, vec!["run", "hi"] },
    p_prompt_yolo = { p_prompt_yolo as ArgvBuilder, vec!["-p", "hi", "--yolo"] },
    run_text = { run_text as ArgvBuilder, vec!["run", "--text", "hi"] },
    tell_bg = { tell_bg as ArgvBuilder, vec!["tell", "hi", "--bg"] },
    non_interactive = { non_interactive as ArgvBuilder, vec!["--non-interactive", "hi"] },
    chat = { chat as ArgvBuilder, vec!["chat", "hi"] },
    ask_json = { ask_json as ArgvBuilder, vec!["ask", "--json", "hi"] },
)]
fn builders_with_no_workdir_or_files(builder: ArgvBuilder, expected: Vec<&str>) {
    let task = AgentTask::new("hi");
    assert_eq!(builder(&task), expected);
}

#[test]
fn exec_full_auto_includes_cd_when_work_dir_set() {
    let task = AgentTask::new("hi").with_work_dir("/tmp/proj");
    assert_eq!(
        exec_full_auto(&task),
        vec!["exec", "--full-auto", "hi", "--cd", "/tmp/proj"]
    );
}

#[test]
fn exec_full_auto_omits_cd_when_no_work_dir() {
    let task = AgentTask::new("hi");
    assert_eq!(exec_full_auto(&task), vec!["exec", "--full-auto", "hi"]);
}

#[test]
fn message_with_files_appends_file_list() {
    let mut task = AgentTask::new("hi");
    task.files = vec!["a.rs".into(), "b.rs".into()];
    assert_eq!(
        message_with_files(&task),
        vec!["--message", "hi", "--no-auto-commits", "a.rs", "b.rs"]
    );
}

#[test]
fn run_quiet_cwd_puts_prompt_last() {
    let task = AgentTask::new("hi").with_work_dir("/ws");
    assert_eq!(
        run_quiet_cwd(&task),
        vec!["run", "--quiet", "--cwd", "/ws", "hi"]
    );
}
