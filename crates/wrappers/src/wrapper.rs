//! The `Wrapper` contract (spec.md §4.1): a concrete instance per external
//! CLI coding agent, built from an id/name/binary/capability descriptor and
//! a pure argv builder, with default `execute`/`executeStream`/`health`
//! behaviour that individual wrappers may override (the Gemini-class
//! `version()` override is the one spec.md calls out by name).

use std::time::Duration;

use async_trait::async_trait;
use gw_core::{AgentResult, AgentTask, WrapperId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::argv::ArgvBuilder;
use crate::process;

/// Default timeout for the base `version()` probe.
pub const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-agent adapter. See spec.md §4.1 for the full contract.
#[async_trait]
pub trait Wrapper: Send + Sync {
    fn id(&self) -> &WrapperId;
    fn name(&self) -> &str;
    fn binary(&self) -> &str;
    fn capabilities(&self) -> &[String];

    /// Runs the task to completion, returning a settled [`AgentResult`].
    async fn execute(&self, task: &AgentTask) -> AgentResult {
        let argv = self.build_argv(task);
        process::execute(self.id().as_str(), self.binary(), &argv, task).await
    }

    /// Spawns the task and streams stdout chunks to the returned channel as
    /// they arrive; the join handle resolves the final [`AgentResult`] once
    /// the child exits (or is killed on timeout / consumer disconnect).
    fn execute_stream(&self, task: AgentTask) -> (mpsc::Receiver<String>, JoinHandle<AgentResult>) {
        let argv = self.build_argv(&task);
        let (tx, rx) = mpsc::channel(32);
        let agent_id = self.id().as_str().to_string();
        let binary = self.binary().to_string();
        let handle = tokio::spawn(process::execute_stream_task(agent_id, binary, argv, task, tx));
        (rx, handle)
    }

    /// Returns a version string if the agent is reachable and healthy
    /// within a bounded time, else `None`. Wrappers whose binary has
    /// pathological version-probe behaviour override this.
    async fn version(&self) -> Option<String> {
        process::probe_version(self.binary(), VERSION_PROBE_TIMEOUT).await
    }

    async fn health(&self) -> bool {
        self.version().await.is_some()
    }

    fn build_argv(&self, task: &AgentTask) -> Vec<String>;
}

/// A wrapper built from a descriptor plus an [`ArgvBuilder`] function,
/// using the default `version`/`health`/`execute` behaviour.
pub struct BasicWrapper {
    pub id: WrapperId,
    pub name: String,
    pub binary: String,
    pub capabilities: Vec<String>,
    pub argv_builder: ArgvBuilder,
}

#[async_trait]
impl Wrapper for BasicWrapper {
    fn id(&self) -> &WrapperId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn binary(&self) -> &str {
        &self.binary
    }

    fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    fn build_argv(&self, task: &AgentTask) -> Vec<String> {
        (self.argv_builder)(task)
    }
}

/// A wrapper whose binary prints a version banner and then hangs instead of
/// exiting (spec.md §4.1 "Gemini class"): `version()` kills the probe after
/// a short grace period rather than waiting for natural exit.
pub struct HangingVersionWrapper {
    pub inner: BasicWrapper,
    pub version_grace: Duration,
}

impl HangingVersionWrapper {
    pub fn new(inner: BasicWrapper) -> Self {
        Self {
            inner,
            version_grace: Duration::from_secs(2),
        }
    }
}

#[async_trait]
impl Wrapper for HangingVersionWrapper {
    fn id(&self) -> &WrapperId {
        self.inner.id()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn binary(&self) -> &str {
        self.inner.binary()
    }

    fn capabilities(&self) -> &[String] {
        self.inner.capabilities()
    }

    fn build_argv(&self, task: &AgentTask) -> Vec<String> {
        self.inner.build_argv(task)
    }

    async fn version(&self) -> Option<String> {
        process::probe_version_hang_after_banner(self.binary(), self.version_grace).await
    }
}

#[cfg(test)]
#[path = "wrapper_tests.rs"]
mod tests;
