//! Argv builders: pure functions `(task) -> argv` (spec.md §4.1).
//!
//! Each builder only reads from the task; none of them touch the
//! filesystem or process state, so they're trivially unit-testable.

use gw_core::AgentTask;

/// A pure function from a task to the argv vector a wrapper's binary should
/// be invoked with (binary name itself is not included).
pub type ArgvBuilder = fn(&AgentTask) -> Vec<String>;

fn work_dir_str(task: &AgentTask) -> Option<String> {
    task.work_dir.as_ref().map(|p| p.display().to_string())
}

/// `[--print, prompt]`
pub fn print_prompt(task: &AgentTask) -> Vec<String> {
    vec!["--print".to_string(), task.prompt.clone()]
}

/// `[--message, prompt, --no-auto-commits, …files]`
pub fn message_with_files(task: &AgentTask) -> Vec<String> {
    let mut argv = vec![
        "--message".to_string(),
        task.prompt.clone(),
        "--no-auto-commits".to_string(),
    ];
    argv.extend(task.files.iter().map(|f| f.display().to_string()));
    argv
}

/// `[run, prompt]`
pub fn run_prompt(task: &AgentTask) -> Vec<String> {
    vec!["run".to_string(), task.prompt.clone()]
}

/// `[exec, --full-auto, prompt, --cd, workDir]`
pub fn exec_full_auto(task: &AgentTask) -> Vec<String> {
    let mut argv = vec![
        "exec".to_string(),
        "--full-auto".to_string(),
        task.prompt.clone(),
    ];
    if let Some(wd) = work_dir_str(task) {
        argv.push("--cd".to_string());
        argv.push(wd);
    }
    argv
}

/// `[-p, prompt, --yolo]`
pub fn p_prompt_yolo(task: &AgentTask) -> Vec<String> {
    vec!["-p".to_string(), task.prompt.clone(), "--yolo".to_string()]
}

/// `[run, --text, prompt]`
pub fn run_text(task: &AgentTask) -> Vec<String> {
    vec!["run".to_string(), "--text".to_string(), task.prompt.clone()]
}

/// `[tell, prompt, --bg]`
pub fn tell_bg(task: &AgentTask) -> Vec<String> {
    vec!["tell".to_string(), task.prompt.clone(), "--bg".to_string()]
}

/// `[run, --problem-statement, prompt, --repo-path, workDir]`
pub fn run_problem_statement(task: &AgentTask) -> Vec<String> {
    let mut argv = vec![
        "run".to_string(),
        "--problem-statement".to_string(),
        task.prompt.clone(),
    ];
    if let Some(wd) = work_dir_str(task) {
        argv.push("--repo-path".to_string());
        argv.push(wd);
    }
    argv
}

/// `[run, --quiet, --cwd, workDir, prompt]`
pub fn run_quiet_cwd(task: &AgentTask) -> Vec<String> {
    let mut argv = vec!["run".to_string(), "--quiet".to_string()];
    if let Some(wd) = work_dir_str(task) {
        argv.push("--cwd".to_string());
        argv.push(wd);
    }
    argv.push(task.prompt.clone());
    argv
}

/// `[--non-interactive, prompt]`
pub fn non_interactive(task: &AgentTask) -> Vec<String> {
    vec!["--non-interactive".to_string(), task.prompt.clone()]
}

/// `[chat, prompt]`
pub fn chat(task: &AgentTask) -> Vec<String> {
    vec!["chat".to_string(), task.prompt.clone()]
}

/// `[ask, --json, prompt]`
pub fn ask_json(task: &AgentTask) -> Vec<String> {
    vec!["ask".to_string(), "--json".to_string(), task.prompt.clone()]
}

#[cfg(test)]
#[path = "argv_tests.rs"]
mod tests;
