//! Thread specs and spec → slash-command compilation (spec.md §4.7).

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadType {
    Base,
    B,
    C,
    P,
    F,
    L,
    Z,
}

/// One agent invocation within a chain (`c`) or parallel (`p`/`f`) thread.
#[derive(Debug, Clone)]
pub struct ThreadStep {
    pub agent: String,
    pub task: String,
    pub output: Option<String>,
    pub reads: Vec<String>,
    pub model: Option<String>,
}

impl ThreadStep {
    pub fn new(agent: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            task: task.into(),
            output: None,
            reads: Vec::new(),
            model: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_reads(mut self, reads: Vec<String>) -> Self {
        self.reads = reads;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Renders `agent[output=<f>][reads=<f1+f2>][model=<m>] <quoted task>`.
    fn render(&self, with_artifacts: bool) -> String {
        let mut s = self.agent.clone();
        if with_artifacts {
            if let Some(output) = &self.output {
                s.push_str(&format!("[output={output}]"));
            }
            if !self.reads.is_empty() {
                s.push_str(&format!("[reads={}]", self.reads.join("+")));
            }
        }
        if let Some(model) = &self.model {
            s.push_str(&format!("[model={model}]"));
        }
        s.push(' ');
        s.push_str(&quote(&self.task));
        s
    }
}

#[derive(Debug, Clone)]
pub struct ThreadSpec {
    pub thread_type: ThreadType,
    pub task: String,
    pub agent: Option<String>,
    pub steps: Vec<ThreadStep>,
    pub skip_clarify: bool,
    pub is_async: bool,
    pub cwd: Option<PathBuf>,
}

impl ThreadSpec {
    pub fn base(task: impl Into<String>) -> Self {
        Self::simple(ThreadType::Base, task)
    }

    pub fn run(agent: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            agent: Some(agent.into()),
            ..Self::simple(ThreadType::B, task)
        }
    }

    pub fn chain(steps: Vec<ThreadStep>) -> Self {
        Self {
            steps,
            ..Self::simple(ThreadType::C, "")
        }
    }

    pub fn parallel(steps: Vec<ThreadStep>) -> Self {
        Self {
            steps,
            ..Self::simple(ThreadType::P, "")
        }
    }

    /// Replicates `task` across `agents` for result fusion.
    pub fn fusion(agents: &[&str], task: impl Into<String>) -> Self {
        let task = task.into();
        let steps = agents.iter().map(|a| ThreadStep::new(*a, task.clone())).collect();
        Self {
            steps,
            ..Self::simple(ThreadType::F, "")
        }
    }

    pub fn with_cwd(mut self, cwd: PathBuf) -> Self {
        self.cwd = Some(cwd);
        self
    }

    pub fn with_skip_clarify(mut self, skip: bool) -> Self {
        self.skip_clarify = skip;
        self
    }

    fn simple(thread_type: ThreadType, task: impl Into<String>) -> Self {
        Self {
            thread_type,
            task: task.into(),
            agent: None,
            steps: Vec::new(),
            skip_clarify: false,
            is_async: false,
            cwd: None,
        }
    }

    /// Compiles this spec into the slash-command string sent to the agent.
    pub fn compile(&self) -> String {
        match self.thread_type {
            ThreadType::Base | ThreadType::L | ThreadType::Z => self.task.clone(),
            ThreadType::B => {
                let agent = self.agent.as_deref().unwrap_or_default();
                format!("/run {agent} {}", quote(&self.task))
            }
            ThreadType::C => {
                let steps = self.steps.iter().map(|s| s.render(true)).collect::<Vec<_>>().join(" -> ");
                let mut cmd = format!("/chain {steps}");
                if self.skip_clarify || self.is_async {
                    cmd.push_str(" --no-clarify");
                }
                cmd
            }
            ThreadType::P | ThreadType::F => {
                let steps = self.steps.iter().map(|s| s.render(false)).collect::<Vec<_>>().join(" -> ");
                format!("/parallel {steps}")
            }
        }
    }
}

/// Wraps `s` in double quotes (escaping inner quotes) if it contains spaces
/// or `->`. A string that is already quoted is returned unchanged.
pub fn quote(s: &str) -> String {
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        return s.to_string();
    }
    if s.contains(' ') || s.contains("->") {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
