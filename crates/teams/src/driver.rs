//! Teams Driver (spec.md §4.8): a filesystem-mediated protocol rooted at
//! `<baseDir>/teams` and `<baseDir>/tasks`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use gw_core::Clock;
use parking_lot::Mutex;
use rand::Rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::broadcast;

use crate::config::{TeamConfig, TeamMember};
use crate::error::TeamsError;
use crate::message::{MessageType, TeamMessage};
use crate::presets::{members_for, TeamPreset};
use crate::task::{compute_progress, TaskPartial, TaskStatus, TeamProgress, TeamTask};

const WATCH_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub enum TeamsEvent {
    TeamCreated(TeamConfig),
    TaskCreated(TeamTask),
    TaskUpdated(TeamTask),
    MessageSent(TeamMessage),
    TasksChanged { team: String },
    TeamOutput { team: String, line: String },
    TeamStderr { team: String, line: String },
    TeamExit { team: String, code: Option<i32> },
}

#[derive(Debug, Clone)]
pub struct TeamState {
    pub config: TeamConfig,
    pub tasks: Vec<TeamTask>,
    pub progress: TeamProgress,
}

pub struct SpawnTeamOpts {
    pub teammate_mode: String,
    pub cwd: Option<PathBuf>,
}

/// Resolves to `~/.claude` the way the donor resolves its own state
/// directory, falling back to `/tmp` if no home directory is known.
pub fn default_base_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp")).join(".claude")
}

pub struct TeamsDriver {
    base_dir: PathBuf,
    clock: Arc<dyn Clock>,
    coordinator_cmd: String,
    watchers: Mutex<HashMap<String, tokio::task::JoinHandle<()>>>,
    events: broadcast::Sender<TeamsEvent>,
}

impl TeamsDriver {
    pub fn new(base_dir: PathBuf, clock: Arc<dyn Clock>, coordinator_cmd: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(1024);
        Self {
            base_dir,
            clock,
            coordinator_cmd: coordinator_cmd.into(),
            watchers: Mutex::new(HashMap::new()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TeamsEvent> {
        self.events.subscribe()
    }

    fn teams_dir(&self) -> PathBuf {
        self.base_dir.join("teams")
    }

    fn tasks_dir(&self) -> PathBuf {
        self.base_dir.join("tasks")
    }

    fn team_dir(&self, name: &str) -> PathBuf {
        self.teams_dir().join(name)
    }

    fn config_path(&self, name: &str) -> PathBuf {
        self.team_dir(name).join("config.json")
    }

    fn team_tasks_dir(&self, name: &str) -> PathBuf {
        self.tasks_dir().join(name)
    }

    pub fn create_team(&self, name: &str, members: Vec<TeamMember>) -> Result<TeamConfig, TeamsError> {
        if self.config_path(name).exists() {
            return Err(TeamsError::AlreadyExists(name.to_string()));
        }
        let config = TeamConfig {
            team_name: name.to_string(),
            team_id: name.to_string(),
            created_at: self.clock.now_ms(),
            members,
        };
        std::fs::create_dir_all(self.team_dir(name).join("inbox"))?;
        std::fs::create_dir_all(self.team_tasks_dir(name))?;
        let body = serde_json::to_string_pretty(&config)?;
        std::fs::write(self.config_path(name), body)?;
        let _ = self.events.send(TeamsEvent::TeamCreated(config.clone()));
        tracing::info!(team = name, "team created");
        Ok(config)
    }

    pub fn create_team_from_preset(&self, preset: TeamPreset, name: Option<String>) -> Result<TeamConfig, TeamsError> {
        let name = name.unwrap_or_else(|| format!("{}-team-{}", preset.name(), random_suffix()));
        self.create_team(&name, members_for(preset))
    }

    pub fn list_teams(&self) -> Result<Vec<String>, TeamsError> {
        let dir = self.teams_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn get_team_config(&self, name: &str) -> Result<TeamConfig, TeamsError> {
        let path = self.config_path(name);
        let body = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TeamsError::NotFound(name.to_string())
            } else {
                TeamsError::Io(e)
            }
        })?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Reads every `.json` file under `tasks/<name>/`, skipping malformed
    /// files rather than failing the whole read.
    pub fn get_tasks(&self, name: &str) -> Vec<TeamTask> {
        let dir = self.team_tasks_dir(name);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut tasks = Vec::new();
        for entry in entries.flatten() {
            if entry.path().extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match std::fs::read_to_string(entry.path()).ok().and_then(|b| serde_json::from_str::<TeamTask>(&b).ok()) {
                Some(task) => tasks.push(task),
                None => tracing::warn!(path = %entry.path().display(), "skipping malformed task file"),
            }
        }
        tasks.sort_by(|a, b| a.id.cmp(&b.id));
        tasks
    }

    pub fn get_team_state(&self, name: &str) -> Result<TeamState, TeamsError> {
        let config = self.get_team_config(name)?;
        let tasks = self.get_tasks(name);
        let progress = compute_progress(&tasks);
        Ok(TeamState { config, tasks, progress })
    }

    pub fn get_all_team_states(&self) -> Result<Vec<TeamState>, TeamsError> {
        self.list_teams()?.iter().map(|name| self.get_team_state(name)).collect()
    }

    pub fn create_task(&self, team: &str, partial: TaskPartial) -> Result<TeamTask, TeamsError> {
        let now = self.clock.now_ms();
        let id = format!("task-{now}-{}", random_suffix());
        let task = TeamTask {
            id: id.clone(),
            subject: partial.subject.unwrap_or_default(),
            description: partial.description.unwrap_or_default(),
            status: partial.status.unwrap_or(TaskStatus::Pending),
            owner: partial.owner,
            blocked_by: partial.blocked_by.unwrap_or_default(),
            blocks: partial.blocks.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        std::fs::create_dir_all(self.team_tasks_dir(team))?;
        self.write_task(team, &task)?;
        let _ = self.events.send(TeamsEvent::TaskCreated(task.clone()));
        Ok(task)
    }

    pub fn update_task(&self, team: &str, id: &str, patch: TaskPartial) -> Result<Option<TeamTask>, TeamsError> {
        let path = self.team_tasks_dir(team).join(format!("{id}.json"));
        let body = match std::fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut task: TeamTask = serde_json::from_str(&body)?;
        if let Some(subject) = patch.subject {
            task.subject = subject;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if patch.owner.is_some() {
            task.owner = patch.owner;
        }
        if let Some(blocked_by) = patch.blocked_by {
            task.blocked_by = blocked_by;
        }
        if let Some(blocks) = patch.blocks {
            task.blocks = blocks;
        }
        task.updated_at = self.clock.now_ms();
        self.write_task(team, &task)?;
        let _ = self.events.send(TeamsEvent::TaskUpdated(task.clone()));
        Ok(Some(task))
    }

    fn write_task(&self, team: &str, task: &TeamTask) -> Result<(), TeamsError> {
        let path = self.team_tasks_dir(team).join(format!("{}.json", task.id));
        std::fs::write(path, serde_json::to_string_pretty(task)?)?;
        Ok(())
    }

    pub fn send_message(
        &self,
        team: &str,
        kind: MessageType,
        from: &str,
        to: &str,
        content: &str,
        summary: Option<String>,
    ) -> Result<TeamMessage, TeamsError> {
        let now = self.clock.now_ms();
        let msg = TeamMessage {
            id: format!("msg-{now}-{}", random_suffix()),
            kind,
            from: from.to_string(),
            to: to.to_string(),
            content: content.to_string(),
            summary,
            timestamp: now,
        };
        let inbox = self.team_dir(team).join("inbox").join(to);
        std::fs::create_dir_all(&inbox)?;
        std::fs::write(inbox.join(format!("{}.json", msg.id)), serde_json::to_string_pretty(&msg)?)?;
        let _ = self.events.send(TeamsEvent::MessageSent(msg.clone()));
        Ok(msg)
    }

    pub fn broadcast(&self, team: &str, from: &str, content: &str, summary: Option<String>) -> Result<(), TeamsError> {
        let config = self.get_team_config(team)?;
        for member in &config.members {
            if member.name == from {
                continue;
            }
            self.send_message(team, MessageType::Broadcast, from, &member.name, content, summary.clone())?;
        }
        Ok(())
    }

    /// Spawns the external coordinator process and forwards its stdout,
    /// stderr, and exit as events.
    pub fn spawn_team(&self, name: String, initial_prompt: String, opts: SpawnTeamOpts) -> Result<(), TeamsError> {
        let mut cmd = Command::new(&self.coordinator_cmd);
        cmd.env("CLAUDE_CODE_EXPERIMENTAL_AGENT_TEAMS", "1");
        cmd.arg("--teammate-mode").arg(&opts.teammate_mode);
        cmd.arg(&initial_prompt);
        if let Some(cwd) = &opts.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(TeamsError::Io)?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let events = self.events.clone();

        let events_out = events.clone();
        let name_out = name.clone();
        if let Some(stdout) = stdout {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    let _ = events_out.send(TeamsEvent::TeamOutput { team: name_out.clone(), line });
                }
            });
        }
        let events_err = events.clone();
        let name_err = name.clone();
        if let Some(stderr) = stderr {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    let _ = events_err.send(TeamsEvent::TeamStderr { team: name_err.clone(), line });
                }
            });
        }
        tokio::spawn(async move {
            let status = child.wait().await.ok();
            let _ = events.send(TeamsEvent::TeamExit {
                team: name,
                code: status.and_then(|s| s.code()),
            });
        });
        Ok(())
    }

    /// Installs a 2-second polling timer that emits `TasksChanged` whenever
    /// the serialised task set differs from the previous poll. Idempotent:
    /// a second `watch` on an already-watched team is a no-op.
    pub fn watch(self: &Arc<Self>, team: &str) {
        if self.watchers.lock().contains_key(team) {
            return;
        }
        let driver = self.clone();
        let team = team.to_string();
        let handle = tokio::spawn(async move {
            let mut last: Option<String> = None;
            loop {
                tokio::time::sleep(WATCH_INTERVAL).await;
                let tasks = driver.get_tasks(&team);
                let Ok(serialized) = serde_json::to_string(&tasks) else { continue };
                if last.as_ref() != Some(&serialized) {
                    last = Some(serialized);
                    let _ = driver.events.send(TeamsEvent::TasksChanged { team: team.clone() });
                }
            }
        });
        self.watchers.lock().insert(team.to_string(), handle);
    }

    pub fn unwatch(&self, team: &str) {
        if let Some(handle) = self.watchers.lock().remove(team) {
            handle.abort();
        }
    }

    pub fn stop_all(&self) {
        for (_, handle) in self.watchers.lock().drain() {
            handle.abort();
        }
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..6).map(|_| std::char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0')).collect()
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
