//! Orchestrator Registry (spec.md §4.2): holds the wrapper set, caches
//! per-wrapper health for a short TTL, selects a wrapper by preferred-order
//! + capability match, and drives fallback on failure.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use gw_core::{AgentResult, AgentStatus, AgentTask, Clock, HealthCacheEntry, WrapperId};
use gw_wrappers::Wrapper;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Synthetic chunk emitted by `execute_stream` when no wrapper is available.
pub const NO_AGENT_BANNER: &str = "no available agent";

pub struct OrchestratorRegistry {
    wrappers: Vec<Arc<dyn Wrapper>>,
    health_cache: Mutex<HashMap<WrapperId, HealthCacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl OrchestratorRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            wrappers: Vec::new(),
            health_cache: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Convenience constructor matching spec.md §4.2: registers the full
    /// known set in a fixed order.
    pub fn with_known_wrappers(clock: Arc<dyn Clock>) -> Self {
        let mut registry = Self::new(clock);
        for wrapper in gw_wrappers::known_wrappers() {
            registry.register(Arc::from(wrapper));
        }
        registry
    }

    pub fn register(&mut self, wrapper: Arc<dyn Wrapper>) {
        tracing::info!(wrapper_id = %wrapper.id(), "wrapper registered");
        self.wrappers.push(wrapper);
    }

    pub fn unregister(&mut self, id: &WrapperId) {
        self.wrappers.retain(|w| w.id() != id);
        self.health_cache.lock().remove(id);
        tracing::info!(wrapper_id = %id, "wrapper unregistered");
    }

    pub fn get_wrapper(&self, id: &WrapperId) -> Option<Arc<dyn Wrapper>> {
        self.wrappers.iter().find(|w| w.id() == id).cloned()
    }

    pub fn list_wrappers(&self) -> Vec<Arc<dyn Wrapper>> {
        self.wrappers.clone()
    }

    /// Consults the health cache; probes and re-caches on a miss or stale
    /// entry. Concurrent probes of the same wrapper are a benign race: the
    /// later write simply wins (spec.md §5 "Shared resources").
    pub async fn is_healthy_id(&self, id: &WrapperId) -> bool {
        match self.get_wrapper(id) {
            Some(w) => self.is_healthy(&w).await,
            None => false,
        }
    }

    pub async fn is_healthy(&self, wrapper: &Arc<dyn Wrapper>) -> bool {
        let now = self.clock.now_ms();
        if let Some(entry) = self.health_cache.lock().get(wrapper.id()) {
            if entry.is_fresh(now) {
                return entry.ok;
            }
        }
        let ok = wrapper.health().await;
        self.health_cache
            .lock()
            .insert(wrapper.id().clone(), HealthCacheEntry::new(ok, self.clock.now_ms()));
        ok
    }

    /// Seeds a health cache entry directly, bypassing a live probe. Used by
    /// tests and by operators who already know an agent's state out of band.
    pub fn force_health(&self, id: &WrapperId, ok: bool) {
        self.health_cache
            .lock()
            .insert(id.clone(), HealthCacheEntry::new(ok, self.clock.now_ms()));
    }

    pub async fn available_agents(&self) -> Vec<Arc<dyn Wrapper>> {
        let mut out = Vec::new();
        for w in &self.wrappers {
            if self.is_healthy(w).await {
                out.push(w.clone());
            }
        }
        out
    }

    pub async fn check_health(&self) -> HashMap<WrapperId, bool> {
        let mut out = HashMap::new();
        for w in &self.wrappers {
            out.insert(w.id().clone(), self.is_healthy(w).await);
        }
        out
    }

    /// Selection algorithm (spec.md §4.2), never fails: returns `None` if
    /// no wrapper is healthy.
    pub async fn select_for_task(&self, task: &AgentTask, preferred: &[WrapperId]) -> Option<Arc<dyn Wrapper>> {
        self.select_excluding(task, preferred, &HashSet::new()).await
    }

    async fn select_excluding(
        &self,
        task: &AgentTask,
        preferred: &[WrapperId],
        excluded: &HashSet<WrapperId>,
    ) -> Option<Arc<dyn Wrapper>> {
        // 1. preferredAgents, in order.
        for id in preferred {
            if excluded.contains(id) {
                continue;
            }
            if let Some(w) = self.get_wrapper(id) {
                let capability_ok = task
                    .capability
                    .as_ref()
                    .map(|c| w.capabilities().iter().any(|cap| cap == c))
                    .unwrap_or(true);
                if capability_ok && self.is_healthy(&w).await {
                    return Some(w);
                }
            }
        }
        // 2. capability hint, registration order.
        if let Some(cap) = &task.capability {
            for w in &self.wrappers {
                if excluded.contains(w.id()) {
                    continue;
                }
                if w.capabilities().iter().any(|c| c == cap) && self.is_healthy(w).await {
                    return Some(w.clone());
                }
            }
        }
        // 3. first healthy wrapper, registration order.
        for w in &self.wrappers {
            if excluded.contains(w.id()) {
                continue;
            }
            if self.is_healthy(w).await {
                return Some(w.clone());
            }
        }
        None
    }

    /// `execute` with fallback (spec.md §4.2): retries across distinct
    /// untried candidates on a non-success result; never throws.
    pub async fn execute(&self, task: &AgentTask, preferred: &[WrapperId], forced: Option<&WrapperId>) -> AgentResult {
        if let Some(id) = forced {
            return match self.get_wrapper(id) {
                Some(w) => w.execute(task).await,
                None => AgentResult::error(id.as_str(), format!("forced wrapper {id} is not registered")),
            };
        }

        let mut tried: HashSet<WrapperId> = HashSet::new();
        loop {
            let Some(wrapper) = self.select_excluding(task, preferred, &tried).await else {
                let tried_list = tried.iter().map(|id| id.as_str().to_string()).collect::<Vec<_>>().join(", ");
                return AgentResult::error(
                    "none",
                    format!("no available agent found (tried: {tried_list})"),
                );
            };
            tried.insert(wrapper.id().clone());
            let result = wrapper.execute(task).await;
            if result.status == AgentStatus::Success {
                return result;
            }
            // Other candidates may still remain; otherwise surface this result.
            let remaining = self.select_excluding(task, preferred, &tried).await;
            if remaining.is_none() {
                return result;
            }
        }
    }

    /// `executeStream`: no fallback. Yields a synthetic banner and an empty
    /// stream when no wrapper is available (spec.md §4.2 "Failure semantics").
    pub async fn execute_stream(
        &self,
        task: AgentTask,
        preferred: &[WrapperId],
        forced: Option<&WrapperId>,
    ) -> (WrapperId, mpsc::Receiver<String>, JoinHandle<AgentResult>) {
        let wrapper = match forced {
            Some(id) => self.get_wrapper(id),
            None => self.select_for_task(&task, preferred).await,
        };
        match wrapper {
            Some(w) => {
                let id = w.id().clone();
                let (rx, handle) = w.execute_stream(task);
                (id, rx, handle)
            }
            None => {
                let (tx, rx) = mpsc::channel(1);
                let _ = tx.try_send(NO_AGENT_BANNER.to_string());
                let handle = tokio::spawn(async move { AgentResult::error("none", NO_AGENT_BANNER) });
                (WrapperId::from_string("none"), rx, handle)
            }
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
