//! WebSocket frame vocabulary (spec.md §4.4 "WebSocket protocol").

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One incoming WS frame. `id` is an optional correlation id echoed in the
/// reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientMessage {
    pub id: Option<String>,
    #[serde(flatten)]
    pub body: ClientFrameBody,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientFrameBody {
    Send { message: String },
    Health,
    Agents,
    History,
    Clear,
    Diff,
    DiffFull,
    Queue,
    Mode { mode: String },
    Preview { url: String },
    PtySpawn {
        agent_id: String,
        cmd: String,
        #[serde(default)]
        cwd: Option<String>,
        #[serde(default)]
        cols: Option<u16>,
        #[serde(default)]
        rows: Option<u16>,
    },
    PtyInput { id: String, data: String },
    PtyResize { id: String, cols: u16, rows: u16 },
    PtyKill { id: String },
    PtyList,
    RpcNew {
        id: String,
        #[serde(default)]
        cwd: Option<String>,
    },
    RpcPrompt { session_id: String, message: String },
    RpcAbort { session_id: String },
    RpcKill { session_id: String },
    RpcList,
    TeamsList,
    TeamsCreate {
        name: String,
        #[serde(default)]
        preset: Option<String>,
    },
    TeamsSpawn {
        name: String,
        initial_prompt: String,
        #[serde(default)]
        teammate_mode: Option<String>,
    },
    TeamsTaskUpdate { team: String, task_id: String, patch: Value },
    TeamsMessage {
        team: String,
        from: String,
        to: String,
        content: String,
        #[serde(default)]
        summary: Option<String>,
    },
    TeamsBroadcast {
        team: String,
        from: String,
        content: String,
        #[serde(default)]
        summary: Option<String>,
    },
    TeamsWatch { team: String },
    TeamsDelete { team: String },
    ThreadLaunch {
        #[serde(default)]
        preset: Option<String>,
        target: String,
        #[serde(default)]
        cwd: Option<String>,
    },
    ThreadList,
    ThreadKill { thread_id: String },
    ThreadAbort { thread_id: String },
    ThreadSteer { thread_id: String, message: String },
    ThreadPreset { preset: String, target: String },
    ThreadAgents,
    ThreadAsyncList,
}

/// One outgoing WS frame.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Hello { session_id: String },
    UserMessage { message: Value },
    Chunk { agent: String, text: String },
    AgentStart { agent: String },
    AgentEnd { agent: String },
    TurnComplete { message: Value },
    Queued { queue_length: usize, preview: Vec<String> },
    Agents { agents: Vec<String> },
    Health { health: Value },
    History { messages: Vec<Value> },
    Diff { diff: Option<String> },
    DiffFull { diff: Option<String> },
    Queue { queue: Vec<String> },
    Mode { mode: String },
    Preview { url: String },
    Ok { id: Option<String>, method: String },
    Error { id: Option<String>, message: String },
    BridgeEvent { event: String, rest: Value },
    PtyData { id: String, data: String },
    PtyExit { id: String, code: Option<i32> },
    PtySpawned { id: String, cols: u16, rows: u16 },
    PtyList { sessions: Vec<Value> },
    RpcEvent { id: String, data: String },
    RpcIdle { id: String },
    RpcKilled { id: String },
    RpcCreated { id: String },
    RpcSessions { sessions: Vec<Value> },
    TeamsCreated { team: Value },
    TeamsSpawned { name: String },
    TeamsOutput { team: String, line: String },
    TeamsExit { team: String, code: Option<i32> },
    TeamsTask { task: Value },
    TeamsTasks { team: String, tasks: Vec<Value> },
    TeamsMessage { message: Value },
    TeamsList { teams: Vec<String> },
    ThreadLaunched { thread_id: String },
    ThreadEvent { thread_id: String, event: Value },
    ThreadIdle { thread_id: String },
    ThreadKilled { thread_id: String },
    ThreadList { threads: Vec<Value> },
    ThreadPresetPreview { command: String },
    ThreadAgents { agents: Vec<String> },
    ThreadAsyncList { threads: Vec<Value> },
}

#[cfg(test)]
#[path = "frames_tests.rs"]
mod tests;
